use std::{
    fmt::UpperHex,
    ops::{Add, BitAndAssign, BitOrAssign, BitXorAssign},
};

use num_conv::CastSigned;
use num_traits::{PrimInt, WrappingAdd, WrappingSub, Zero};

use crate::bits::Bits;

pub trait Upcast {
    type UpcastedType: Add<Output = Self::UpcastedType> + PartialOrd + Copy;

    fn upcast(&self) -> Self::UpcastedType;
}

macro_rules! impl_upcast {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl Upcast for $t {
                type UpcastedType = $wide;

                fn upcast(&self) -> Self::UpcastedType {
                    *self as _
                }
            }
        )*
    };
}

impl_upcast!(u8 => u16, u16 => u32, u32 => u64, u64 => u128);

/// Moves operand values in and out of the 64-bit vector representation.
pub trait Register: Sized {
    /// Keeps the low bits that fit.
    fn truncate_from(value: u64) -> Self;
    fn zero_extend(self) -> u64;
}

macro_rules! impl_register {
    ($($t:ty),*) => {
        $(
            impl Register for $t {
                fn truncate_from(value: u64) -> Self {
                    value as $t
                }
                fn zero_extend(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_register!(u8, u16, u32, u64);

pub trait NumericOps:
    PrimInt
    + WrappingAdd
    + WrappingSub
    + CastSigned<Signed: Zero + PartialOrd>
    + Upcast
    + BitOrAssign
    + BitAndAssign
    + BitXorAssign
    + UpperHex
    + From<bool>
    + CalcFlags
    + Bits
    + Register
{
}

impl NumericOps for u8 {}
impl NumericOps for u16 {}
impl NumericOps for u32 {}
impl NumericOps for u64 {}

// should this really be a trait....?
pub trait CalcFlags {
    /// Signed overflow of `a + b (+ carry) = result`.
    fn calc_overflow(a: Self, b: Self, result: Self) -> bool;
    /// Signed overflow of `a - b (- borrow) = result`.
    fn calc_overflow_sub(a: Self, b: Self, result: Self) -> bool;
    fn calc_af(a: Self, b: Self, result: Self) -> bool;
    fn calc_parity(result: Self) -> bool;
}

macro_rules! impl_calc_flags {
    ($($t:ty),*) => {
        $(
            impl CalcFlags for $t {
                fn calc_overflow(a: Self, b: Self, result: Self) -> bool {
                    (a ^ result) & (b ^ result) & (1 << (<$t>::BITS - 1)) != 0
                }
                fn calc_overflow_sub(a: Self, b: Self, result: Self) -> bool {
                    (a ^ b) & (a ^ result) & (1 << (<$t>::BITS - 1)) != 0
                }
                fn calc_af(a: Self, b: Self, result: Self) -> bool {
                    (a.get_low() ^ b.get_low() ^ result.get_low()) & 0x10 != 0
                }
                fn calc_parity(result: Self) -> bool {
                    result.get_low().count_ones() % 2 == 0
                }
            }
        )*
    };
}

impl_calc_flags!(u8, u16, u32, u64);

pub fn calc_sign_bit<T>(value: T) -> bool
where
    T: NumericOps,
{
    value.cast_signed() < <<T as CastSigned>::Signed as Zero>::zero()
}
