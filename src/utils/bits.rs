//! Word-level bit tricks used by the row operations.

use crate::models::CellWidth;

/// Group-swap masks for reversal by doubling, widest span first.
/// Each mask selects the low half of every `2 * span` bit block.
const SWAP_MASKS: [(u32, u64); 6] = [
    (32, 0x0000_0000_FFFF_FFFF),
    (16, 0x0000_FFFF_0000_FFFF),
    (8, 0x00FF_00FF_00FF_00FF),
    (4, 0x0F0F_0F0F_0F0F_0F0F),
    (2, 0x3333_3333_3333_3333),
    (1, 0x5555_5555_5555_5555),
];

/// Bit 0 of every cell, indexed by cell width exponent
const CELL_LOW_BITS: [u64; 7] = [
    u64::MAX,
    0x5555_5555_5555_5555,
    0x1111_1111_1111_1111,
    0x0101_0101_0101_0101,
    0x0001_0001_0001_0001,
    0x0000_0001_0000_0001,
    0x0000_0000_0000_0001,
];

/// Reverse the order of the cells inside one word.
///
/// Stops halving once the span reaches the cell width, so the bits inside
/// each cell keep their order.
pub fn reverse_cells(word: u64, width: CellWidth) -> u64 {
    let bits = width.bits();
    let mut x = word;
    for &(span, mask) in &SWAP_MASKS {
        if span < bits {
            break;
        }
        x = ((x >> span) & mask) | ((x & mask) << span);
    }
    x
}

/// Shift a little-endian word sequence down by `shift` bits, carrying the
/// low bits of each word into the top of the previous one.
pub fn shift_down(words: &mut [u64], shift: u32) {
    if shift == 0 {
        return;
    }
    debug_assert!(shift < 64);
    let len = words.len();
    for i in 0..len {
        let carry = if i + 1 < len {
            words[i + 1] << (64 - shift)
        } else {
            0
        };
        words[i] = (words[i] >> shift) | carry;
    }
}

/// Reverse the cell order of one packed row in place.
///
/// `padding` is the number of unused high bits in the row's last word.
/// Padding bits are discarded, the result always has a clean tail.
pub fn reverse_row_words(row: &mut [u64], width: CellWidth, padding: u32) {
    row.reverse();
    for word in row.iter_mut() {
        *word = reverse_cells(*word, width);
    }
    shift_down(row, padding);
}

/// Count cells of one word holding a non-zero value.
pub fn count_nonzero_cells(word: u64, width: CellWidth) -> u32 {
    let mut x = word;
    let mut span = 1;
    // Fold every bit of a cell down into its bit 0.
    while span < width.bits() {
        x |= x >> span;
        span <<= 1;
    }
    (x & CELL_LOW_BITS[width.exp() as usize]).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_cells_single_bits() {
        assert_eq!(reverse_cells(1, CellWidth::Bit), 1 << 63);
        assert_eq!(reverse_cells(0b10, CellWidth::Bit), 1 << 62);
        assert_eq!(
            reverse_cells(0x0123_4567_89AB_CDEF, CellWidth::Bit),
            0x0123_4567_89AB_CDEFu64.reverse_bits()
        );
    }

    #[test]
    fn test_reverse_cells_keeps_cell_bits() {
        assert_eq!(
            reverse_cells(0x0123_4567_89AB_CDEF, CellWidth::FourBit),
            0xFEDC_BA98_7654_3210
        );
        assert_eq!(
            reverse_cells(0x0123_4567_89AB_CDEF, CellWidth::Byte),
            0xEFCD_AB89_6745_2301
        );
        assert_eq!(
            reverse_cells(0x0123_4567_89AB_CDEF, CellWidth::ThirtyTwoBit),
            0x89AB_CDEF_0123_4567
        );
        assert_eq!(
            reverse_cells(0x0123_4567_89AB_CDEF, CellWidth::Long),
            0x0123_4567_89AB_CDEF
        );
    }

    #[test]
    fn test_shift_down_carries() {
        let mut words = [0xF0, 0x1, 0x8000_0000_0000_0000];
        shift_down(&mut words, 4);
        assert_eq!(words, [0x1000_0000_0000_000F, 0, 0x0800_0000_0000_0000]);

        let mut unchanged = [3u64, 5];
        shift_down(&mut unchanged, 0);
        assert_eq!(unchanged, [3, 5]);
    }

    #[test]
    fn test_reverse_row_words_with_padding() {
        // Three 16-bit cells in one word: 16 bits of padding.
        let mut row = [0x0000_0003_0002_0001];
        reverse_row_words(&mut row, CellWidth::SixteenBit, 16);
        assert_eq!(row, [0x0000_0001_0002_0003]);
    }

    #[test]
    fn test_count_nonzero_cells() {
        assert_eq!(count_nonzero_cells(0, CellWidth::Byte), 0);
        assert_eq!(count_nonzero_cells(0b1011, CellWidth::Bit), 3);
        assert_eq!(count_nonzero_cells(0x8000_0000_0000_0001, CellWidth::Byte), 2);
        assert_eq!(count_nonzero_cells(0x0000_8000_0000_0100, CellWidth::SixteenBit), 2);
        assert_eq!(count_nonzero_cells(0x8000_0000, CellWidth::ThirtyTwoBit), 1);
        assert_eq!(count_nonzero_cells(u64::MAX, CellWidth::Long), 1);
        assert_eq!(count_nonzero_cells(u64::MAX, CellWidth::TwoBit), 32);
    }
}
