//! Emulator-style model of the instructions under test.
//!
//! Each function updates the destination in place and sets the flags the
//! instruction defines, leaving every other flag as it found it.

use crate::{
    flags::FlagSet,
    traits::{NumericOps, calc_sign_bit},
};

pub fn only_flags<F, T, T2>(op: F) -> impl Fn(&mut T, &mut T, &mut T2)
where
    F: Fn(&mut T, &mut T, &mut T2),
    T: NumericOps,
{
    move |a, b, c| {
        let mut ax = *a;
        let mut bx = *b;
        op(&mut ax, &mut bx, c)
    }
}

pub fn set_result_flags<T>(flags: &mut FlagSet, result: T)
where
    T: NumericOps,
{
    flags.set(FlagSet::ZERO, result == T::zero());
    flags.set(FlagSet::SIGN, calc_sign_bit(result));
    flags.set(FlagSet::PARITY, T::calc_parity(result));
}

fn calc_add_flags<T>(flags: &mut FlagSet, left: T, right: T, result: T)
where
    T: NumericOps,
{
    flags.set(FlagSet::CARRY, result < left);
    flags.set(FlagSet::OVERFLOW, T::calc_overflow(left, right, result));
    flags.set(FlagSet::AUX_CARRY, T::calc_af(left, right, result));
    set_result_flags(flags, result);
}

fn calc_sub_flags<T>(flags: &mut FlagSet, left: T, right: T, result: T)
where
    T: NumericOps,
{
    flags.set(FlagSet::CARRY, left < right);
    flags.set(FlagSet::OVERFLOW, T::calc_overflow_sub(left, right, result));
    flags.set(FlagSet::AUX_CARRY, T::calc_af(left, right, result));
    set_result_flags(flags, result);
}

pub fn add<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    *rm = old.wrapping_add(reg);
    calc_add_flags(flags, old, *reg, *rm);
}

pub fn add_with_carry<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    let c: T = flags.contains(FlagSet::CARRY).into();
    *rm = old.wrapping_add(reg).wrapping_add(&c);
    calc_add_flags(flags, old, *reg, *rm);

    let upcasted = old.upcast() + (*reg).upcast() + c.upcast();
    flags.set(FlagSet::CARRY, upcasted > T::max_value().upcast());
}

pub fn sub<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    *rm = old.wrapping_sub(reg);
    calc_sub_flags(flags, old, *reg, *rm);
}

pub fn sub_with_borrow<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    let c: T = flags.contains(FlagSet::CARRY).into();
    *rm = old.wrapping_sub(reg).wrapping_sub(&c);
    calc_sub_flags(flags, old, *reg, *rm);

    let carry = old.upcast() < (*reg).upcast() + c.upcast();
    flags.set(FlagSet::CARRY, carry);
}

pub fn cmp<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    only_flags(sub::<T>)(rm, reg, flags);
}

fn logic_flags<T>(flags: &mut FlagSet, result: T)
where
    T: NumericOps,
{
    set_result_flags(flags, result);
    flags.remove(FlagSet::CARRY);
    flags.remove(FlagSet::OVERFLOW);
    flags.remove(FlagSet::AUX_CARRY);
}

pub fn bitwise_or<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    *rm |= *reg;
    logic_flags(flags, *rm);
}

pub fn bitwise_and<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    *rm &= *reg;
    logic_flags(flags, *rm);
}

pub fn bitwise_xor<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    *rm ^= *reg;
    logic_flags(flags, *rm);
}

pub fn bitwise_not<T>(rm: &mut T, _flags: &mut FlagSet)
where
    T: NumericOps,
{
    *rm = !*rm;
}

// CF is left alone by inc and dec
pub fn inc<T>(rm: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    *rm = old.wrapping_add(&T::one());
    flags.set(FlagSet::OVERFLOW, T::calc_overflow(old, T::one(), *rm));
    flags.set(FlagSet::AUX_CARRY, T::calc_af(old, T::one(), *rm));
    set_result_flags(flags, *rm);
}

pub fn dec<T>(rm: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let old = *rm;
    *rm = old.wrapping_sub(&T::one());
    flags.set(FlagSet::OVERFLOW, T::calc_overflow_sub(old, T::one(), *rm));
    flags.set(FlagSet::AUX_CARRY, T::calc_af(old, T::one(), *rm));
    set_result_flags(flags, *rm);
}

pub fn neg<T>(rm: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let mut zero = T::zero();
    let mut old = *rm;
    sub(&mut zero, &mut old, flags);
    *rm = zero;
}

pub fn shl<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    let old = *rm;
    let carry = if count < T::BITS {
        *rm = old << count as usize;
        old.get_bit(T::BITS - count)
    } else {
        *rm = T::zero();
        count == T::BITS && old.get_bit(0)
    };
    flags.set(FlagSet::CARRY, carry);
    flags.set(FlagSet::OVERFLOW, count == 1 && rm.msb() != carry);
    set_result_flags(flags, *rm);
}

pub fn shr<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    let old = *rm;
    let carry = if count < T::BITS {
        *rm = old >> count as usize;
        old.get_bit(count - 1)
    } else {
        *rm = T::zero();
        count == T::BITS && old.msb()
    };
    flags.set(FlagSet::CARRY, carry);
    flags.set(FlagSet::OVERFLOW, count == 1 && old.msb());
    set_result_flags(flags, *rm);
}

pub fn sar<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    let old = *rm;
    let top = T::BITS - 1;
    // past the top bit every position holds a copy of the sign
    *rm = old.signed_shr(count.min(top));
    let carry = old.signed_shr((count - 1).min(top)).get_bit(0);
    flags.set(FlagSet::CARRY, carry);
    flags.remove(FlagSet::OVERFLOW);
    set_result_flags(flags, *rm);
}

pub fn rol<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    *rm = rm.rotate_left(count % T::BITS);
    let carry = rm.get_bit(0);
    flags.set(FlagSet::CARRY, carry);
    flags.set(FlagSet::OVERFLOW, count == 1 && rm.msb() != carry);
}

pub fn ror<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    *rm = rm.rotate_right(count % T::BITS);
    flags.set(FlagSet::CARRY, rm.msb());
    flags.set(
        FlagSet::OVERFLOW,
        count == 1 && rm.msb() != rm.get_bit(T::BITS - 2),
    );
}

pub fn rotate_through_carry_left<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let masked = u32::from(count & T::COUNT_MASK);
    if masked == 0 {
        return;
    }
    let mut carry = flags.contains(FlagSet::CARRY);
    for _ in 0..masked % (T::BITS + 1) {
        let out = rm.msb();
        let shifted_in: T = carry.into();
        *rm = (*rm << 1) | shifted_in;
        carry = out;
    }
    flags.set(FlagSet::CARRY, carry);
    flags.set(FlagSet::OVERFLOW, masked == 1 && rm.msb() != carry);
}

pub fn rotate_through_carry_right<T>(rm: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let masked = u32::from(count & T::COUNT_MASK);
    if masked == 0 {
        return;
    }
    let mut carry = flags.contains(FlagSet::CARRY);
    flags.set(FlagSet::OVERFLOW, masked == 1 && rm.msb() != carry);
    for _ in 0..masked % (T::BITS + 1) {
        let out = rm.get_bit(0);
        *rm = *rm >> 1;
        rm.set_bit(T::BITS - 1, carry);
        carry = out;
    }
    flags.set(FlagSet::CARRY, carry);
}

pub fn double_shift_left<T>(rm: &mut T, reg: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    let old = *rm;
    *rm = if count < T::BITS {
        (old << count as usize) | (*reg >> (T::BITS - count) as usize)
    } else {
        *reg
    };
    flags.set(FlagSet::CARRY, old.get_bit(T::BITS - count));
    flags.set(FlagSet::OVERFLOW, count == 1 && rm.msb() != old.msb());
    set_result_flags(flags, *rm);
}

pub fn double_shift_right<T>(rm: &mut T, reg: &mut T, count: u8, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let count = u32::from(count & T::COUNT_MASK);
    if count == 0 {
        return;
    }
    let old = *rm;
    *rm = if count < T::BITS {
        (old >> count as usize) | (*reg << (T::BITS - count) as usize)
    } else {
        *reg
    };
    flags.set(FlagSet::CARRY, old.get_bit(count - 1));
    flags.set(FlagSet::OVERFLOW, count == 1 && rm.msb() != old.msb());
    set_result_flags(flags, *rm);
}

fn bit_offset<T>(reg: &T) -> u32
where
    T: NumericOps,
{
    // register operands select a bit modulo the operand width
    (reg.zero_extend() % u64::from(T::BITS)) as u32
}

pub fn bit_test<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    flags.set(FlagSet::CARRY, rm.get_bit(bit_offset(reg)));
}

pub fn bit_test_set<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let n = bit_offset(reg);
    flags.set(FlagSet::CARRY, rm.get_bit(n));
    rm.set_bit(n, true);
}

pub fn bit_test_reset<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let n = bit_offset(reg);
    flags.set(FlagSet::CARRY, rm.get_bit(n));
    rm.set_bit(n, false);
}

pub fn bit_test_complement<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    let n = bit_offset(reg);
    let old = rm.get_bit(n);
    flags.set(FlagSet::CARRY, old);
    rm.set_bit(n, !old);
}

pub fn bit_scan_forward<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    flags.set(FlagSet::ZERO, *reg == T::zero());
    if *reg != T::zero() {
        *rm = T::truncate_from(u64::from(reg.trailing_zeros()));
    }
}

pub fn bit_scan_reverse<T>(rm: &mut T, reg: &mut T, flags: &mut FlagSet)
where
    T: NumericOps,
{
    flags.set(FlagSet::ZERO, *reg == T::zero());
    if *reg != T::zero() {
        *rm = T::truncate_from(u64::from(T::BITS - 1 - reg.leading_zeros()));
    }
}
