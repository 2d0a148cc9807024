/// Width of a single matrix cell. The discriminant is log2 of the bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellWidth {
    /// 1-bit cells (plain adjacency)
    Bit = 0,
    /// 2-bit cells
    TwoBit = 1,
    /// 4-bit cells
    FourBit = 2,
    /// 8-bit cells
    Byte = 3,
    /// 16-bit cells
    SixteenBit = 4,
    /// 32-bit cells
    ThirtyTwoBit = 5,
    /// 64-bit cells, one cell per word
    Long = 6,
}

impl CellWidth {
    /// Every supported width, narrowest first
    pub const ALL: [CellWidth; 7] = [
        CellWidth::Bit,
        CellWidth::TwoBit,
        CellWidth::FourBit,
        CellWidth::Byte,
        CellWidth::SixteenBit,
        CellWidth::ThirtyTwoBit,
        CellWidth::Long,
    ];

    /// log2 of the cell width
    pub fn exp(self) -> u32 {
        self as u32
    }

    /// Number of bits in one cell
    pub fn bits(self) -> u32 {
        1 << self.exp()
    }

    /// Mask isolating one cell in the low bits of a word.
    ///
    /// `Long` is special-cased: `1 << 64` would overflow.
    pub fn mask(self) -> u64 {
        match self {
            CellWidth::Long => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Get the width from its log2 (0..=6)
    pub fn from_exp(exp: u8) -> Option<Self> {
        Self::ALL.get(exp as usize).copied()
    }

    /// Get the width from a bit count (1, 2, 4, 8, 16, 32 or 64)
    pub fn from_bits(bits: u32) -> Option<Self> {
        if !bits.is_power_of_two() {
            return None;
        }
        u8::try_from(bits.trailing_zeros())
            .ok()
            .and_then(Self::from_exp)
    }
}
