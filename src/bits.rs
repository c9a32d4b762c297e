pub trait Bits {
    const BITS: u32;
    /// Shift counts are masked to this many low bits before use.
    const COUNT_MASK: u8;

    fn get_low(&self) -> u8;
    fn get_bit(&self, n: u32) -> bool;
    fn set_bit(&mut self, n: u32, val: bool);

    fn msb(&self) -> bool {
        self.get_bit(Self::BITS - 1)
    }
}

macro_rules! impl_bits {
    ($($t:ty),*) => {
        $(
            impl Bits for $t {
                const BITS: u32 = <$t>::BITS;
                const COUNT_MASK: u8 = if <$t>::BITS == 64 { 0x3F } else { 0x1F };

                fn get_low(&self) -> u8 {
                    (*self & 0xFF) as u8
                }
                fn get_bit(&self, n: u32) -> bool {
                    (*self >> n) & 1 != 0
                }
                fn set_bit(&mut self, n: u32, val: bool) {
                    if val {
                        *self |= 1 << n;
                    } else {
                        *self &= !(1 << n);
                    }
                }
            }
        )*
    };
}

impl_bits!(u8, u16, u32, u64);
