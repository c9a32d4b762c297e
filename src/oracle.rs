//! Reference values computed from first principles.
//!
//! Every function here works on operands already truncated to the operand
//! size and derives flags from full-precision (u128/i128) arithmetic rather
//! than from bit tricks on the truncated result, so it shares no code path
//! with either executor.

use crate::{
    flags::FlagSet,
    operand::OperandSize,
    operation::OperationKind,
    vector::TestVector,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expected {
    pub value: u64,
    pub flags: FlagSet,
}

pub fn evaluate(op: OperationKind, size: OperandSize, vector: &TestVector) -> Expected {
    let a = size.truncate(vector.operand(0));
    let b = size.truncate(vector.operand(1));
    let carry = vector.carry();
    let incoming = FlagSet::with_carry(carry);

    match op {
        OperationKind::Add => add(size, a, b, false),
        OperationKind::Adc => add(size, a, b, carry),
        OperationKind::Sub => sub(size, a, b, false),
        OperationKind::Sbb => sub(size, a, b, carry),
        OperationKind::Cmp => Expected {
            value: a,
            ..sub(size, a, b, false)
        },
        OperationKind::And => logic(size, a & b),
        OperationKind::Or => logic(size, a | b),
        OperationKind::Xor => logic(size, a ^ b),
        OperationKind::Not => Expected {
            value: size.truncate(!a),
            flags: incoming,
        },
        OperationKind::Inc => inc(size, a, incoming),
        OperationKind::Dec => dec(size, a, incoming),
        OperationKind::Neg => neg(size, a),
        OperationKind::Shl
        | OperationKind::Shr
        | OperationKind::Sar
        | OperationKind::Rol
        | OperationKind::Ror
        | OperationKind::Rcl
        | OperationKind::Rcr => {
            let count = vector.operand(1) & size.count_mask();
            if count == 0 {
                return Expected {
                    value: a,
                    flags: incoming,
                };
            }
            shift(op, size, a, count as u32, carry, incoming)
        }
        OperationKind::Shld | OperationKind::Shrd => {
            let count = vector.operand(2) & size.count_mask();
            // past the operand width the result is undefined; nothing changes
            if count == 0 || count > u64::from(size.bits()) {
                return Expected {
                    value: a,
                    flags: incoming,
                };
            }
            double_shift(op, size, a, b, count as u32)
        }
        OperationKind::Bt | OperationKind::Bts | OperationKind::Btr | OperationKind::Btc => {
            bit_test(op, size, a, vector.operand(1), incoming)
        }
        OperationKind::Bsf | OperationKind::Bsr => bit_scan(op, a, b, incoming),
    }
}

/// ZF, SF and PF depend only on the truncated result.
pub fn result_flags(size: OperandSize, result: u64) -> FlagSet {
    let mut flags = FlagSet::empty();
    flags.set(FlagSet::ZERO, result == 0);
    flags.set(FlagSet::SIGN, size.is_negative(result));
    flags.set(FlagSet::PARITY, (result & 0xFF).count_ones() % 2 == 0);
    flags
}

fn fits_signed(size: OperandSize, value: i128) -> bool {
    let half = 1i128 << (size.bits() - 1);
    (-half..half).contains(&value)
}

fn add(size: OperandSize, a: u64, b: u64, carry: bool) -> Expected {
    let c = u64::from(carry);
    let sum = u128::from(a) + u128::from(b) + u128::from(c);
    let signed =
        i128::from(size.sign_extend(a)) + i128::from(size.sign_extend(b)) + i128::from(c);
    let value = size.truncate(sum as u64);

    let mut flags = result_flags(size, value);
    flags.set(FlagSet::CARRY, sum > u128::from(size.mask()));
    flags.set(FlagSet::OVERFLOW, !fits_signed(size, signed));
    flags.set(FlagSet::AUX_CARRY, (a & 0xF) + (b & 0xF) + c > 0xF);
    Expected { value, flags }
}

fn sub(size: OperandSize, a: u64, b: u64, borrow: bool) -> Expected {
    let c = u64::from(borrow);
    let signed =
        i128::from(size.sign_extend(a)) - i128::from(size.sign_extend(b)) - i128::from(c);
    let value = size.truncate(a.wrapping_sub(b).wrapping_sub(c));

    let mut flags = result_flags(size, value);
    flags.set(FlagSet::CARRY, u128::from(a) < u128::from(b) + u128::from(c));
    flags.set(FlagSet::OVERFLOW, !fits_signed(size, signed));
    flags.set(FlagSet::AUX_CARRY, (a & 0xF) < (b & 0xF) + c);
    Expected { value, flags }
}

fn logic(size: OperandSize, value: u64) -> Expected {
    let value = size.truncate(value);
    // CF and OF are always cleared
    Expected {
        value,
        flags: result_flags(size, value),
    }
}

fn inc(size: OperandSize, a: u64, incoming: FlagSet) -> Expected {
    let value = size.truncate(a.wrapping_add(1));
    let mut flags = result_flags(size, value) | (incoming & FlagSet::CARRY);
    flags.set(FlagSet::OVERFLOW, a == size.sign_bit() - 1);
    flags.set(FlagSet::AUX_CARRY, a & 0xF == 0xF);
    Expected { value, flags }
}

fn dec(size: OperandSize, a: u64, incoming: FlagSet) -> Expected {
    let value = size.truncate(a.wrapping_sub(1));
    let mut flags = result_flags(size, value) | (incoming & FlagSet::CARRY);
    flags.set(FlagSet::OVERFLOW, a == size.sign_bit());
    flags.set(FlagSet::AUX_CARRY, a & 0xF == 0);
    Expected { value, flags }
}

fn neg(size: OperandSize, a: u64) -> Expected {
    let value = size.truncate(a.wrapping_neg());
    let mut flags = result_flags(size, value);
    flags.set(FlagSet::CARRY, a != 0);
    flags.set(FlagSet::OVERFLOW, a == size.sign_bit());
    flags.set(FlagSet::AUX_CARRY, a & 0xF != 0);
    Expected { value, flags }
}

fn bit(value: u128, n: u32) -> bool {
    (value >> n) & 1 != 0
}

/// Single-operand shifts and rotates with a non-zero masked count.
fn shift(
    op: OperationKind,
    size: OperandSize,
    a: u64,
    count: u32,
    carry: bool,
    incoming: FlagSet,
) -> Expected {
    let bits = size.bits();
    let mask = u128::from(size.mask());
    let wide = u128::from(a);
    let top = bits - 1;

    let (value, carry_out, overflow) = match op {
        OperationKind::Shl => {
            let shifted = wide << count;
            let value = shifted & mask;
            let cf = bit(shifted, bits);
            (value, cf, bit(value, top) != cf)
        }
        OperationKind::Shr => {
            let value = wide >> count;
            let cf = count <= bits && bit(wide, count - 1);
            (value, cf, bit(wide, top))
        }
        OperationKind::Sar => {
            let signed = i128::from(size.sign_extend(a));
            let value = ((signed >> count) as u128) & mask;
            let cf = bit((signed >> (count - 1)) as u128, 0);
            (value, cf, false)
        }
        OperationKind::Rol => {
            let n = count % bits;
            let value = ((wide << n) | (wide >> (bits - n))) & mask;
            let cf = bit(value, 0);
            (value, cf, bit(value, top) != cf)
        }
        OperationKind::Ror => {
            let n = count % bits;
            let value = ((wide >> n) | (wide << (bits - n))) & mask;
            (value, bit(value, top), bit(value, top) != bit(value, top - 1))
        }
        OperationKind::Rcl | OperationKind::Rcr => {
            // rotate through a (bits + 1)-wide value with CF on top
            let width = bits + 1;
            let width_mask = (1u128 << width) - 1;
            let n = count % width;
            let through = (u128::from(carry) << bits) | wide;
            let rotated = if op == OperationKind::Rcl {
                ((through << n) | (through >> (width - n))) & width_mask
            } else {
                ((through >> n) | (through << (width - n))) & width_mask
            };
            let value = rotated & mask;
            let cf = bit(rotated, bits);
            let of = if op == OperationKind::Rcl {
                bit(value, top) != cf
            } else {
                bit(value, top) != bit(value, top - 1)
            };
            (value, cf, of)
        }
        _ => unreachable!("{} is not a single-operand shift", op),
    };
    let value = value as u64;

    let mut flags = match op {
        OperationKind::Shl | OperationKind::Shr | OperationKind::Sar => result_flags(size, value),
        _ => incoming,
    };
    flags.set(FlagSet::CARRY, carry_out);
    flags.set(FlagSet::OVERFLOW, count == 1 && overflow);
    Expected { value, flags }
}

fn double_shift(op: OperationKind, size: OperandSize, dest: u64, src: u64, count: u32) -> Expected {
    let bits = size.bits();
    let mask = u128::from(size.mask());
    let (d, s) = (u128::from(dest), u128::from(src));
    let top = bits - 1;

    let (value, carry_out) = if op == OperationKind::Shld {
        let value = ((d << count) | (s >> (bits - count))) & mask;
        (value, bit(d, bits - count))
    } else {
        let value = ((d >> count) | (s << (bits - count))) & mask;
        (value, bit(d, count - 1))
    };
    let value = value as u64;

    let mut flags = result_flags(size, value);
    flags.set(FlagSet::CARRY, carry_out);
    flags.set(
        FlagSet::OVERFLOW,
        count == 1 && bit(u128::from(value), top) != bit(d, top),
    );
    Expected { value, flags }
}

fn bit_test(
    op: OperationKind,
    size: OperandSize,
    a: u64,
    offset: u64,
    incoming: FlagSet,
) -> Expected {
    let n = offset % u64::from(size.bits());
    let selected = 1u64 << n;
    let value = match op {
        OperationKind::Bts => a | selected,
        OperationKind::Btr => a & !selected,
        OperationKind::Btc => a ^ selected,
        _ => a,
    };
    let mut flags = incoming;
    flags.set(FlagSet::CARRY, a & selected != 0);
    Expected { value, flags }
}

fn bit_scan(op: OperationKind, dest: u64, src: u64, incoming: FlagSet) -> Expected {
    let mut flags = incoming;
    flags.set(FlagSet::ZERO, src == 0);
    let value = match (src, op) {
        // destination keeps its previous contents
        (0, _) => dest,
        (_, OperationKind::Bsf) => u64::from(src.trailing_zeros()),
        _ => u64::from(63 - src.leading_zeros()),
    };
    Expected { value, flags }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: OperationKind, size: OperandSize, vector: TestVector) -> Expected {
        evaluate(op, size, &vector)
    }

    #[test]
    fn add_word_scenario_test() {
        let expected = eval(
            OperationKind::Add,
            OperandSize::Word,
            TestVector::binary(0x1234, 0x0128),
        );
        assert_eq!(expected.value, 0x135C);
        for flag in [FlagSet::CARRY, FlagSet::ZERO, FlagSet::SIGN, FlagSet::OVERFLOW] {
            assert!(!expected.flags.contains(flag));
        }
        // 0x5C has four bits set
        assert_eq!(expected.flags, FlagSet::PARITY);
    }

    #[test]
    fn neg_word_scenarios_test() {
        let zero = eval(OperationKind::Neg, OperandSize::Word, TestVector::unary(0));
        assert_eq!(zero.value, 0);
        assert!(!zero.flags.contains(FlagSet::CARRY));
        assert!(zero.flags.contains(FlagSet::ZERO));

        let one = eval(OperationKind::Neg, OperandSize::Word, TestVector::unary(1));
        assert_eq!(one.value, 0xFFFF);
        assert!(one.flags.contains(FlagSet::CARRY));
        assert!(one.flags.contains(FlagSet::SIGN));
        assert!(!one.flags.contains(FlagSet::OVERFLOW));

        let min = eval(OperationKind::Neg, OperandSize::Word, TestVector::unary(0x8000));
        assert_eq!(min.value, 0x8000);
        assert!(min.flags.contains(FlagSet::OVERFLOW | FlagSet::CARRY));
    }

    #[test]
    fn add_sub_exhaustive_byte_test() {
        let size = OperandSize::Byte;
        for a in 0..=0xFFu64 {
            for b in 0..=0xFFu64 {
                let vector = TestVector::binary(a, b);
                let sum = eval(OperationKind::Add, size, vector.clone());
                assert_eq!(sum.value, (a + b) & 0xFF);
                assert_eq!(sum.flags.contains(FlagSet::CARRY), a + b > 0xFF);

                let diff = eval(OperationKind::Sub, size, vector);
                assert_eq!(diff.value, a.wrapping_sub(b) & 0xFF);
                assert_eq!(diff.flags.contains(FlagSet::CARRY), a < b);
            }
        }
    }

    #[test]
    fn add_carry_all_sizes_test() {
        let samples = [0, 1, 0x7F, 0x80, 0xFF, 0x7FFF, 0x8000, 0xFFFF, 0xFFFF_FFFF, u64::MAX];
        for size in OperandSize::ALL {
            for &a in &samples {
                for &b in &samples {
                    let (a, b) = (size.truncate(a), size.truncate(b));
                    let sum = eval(OperationKind::Add, size, TestVector::binary(a, b));
                    let full = u128::from(a) + u128::from(b);
                    assert_eq!(u128::from(sum.value), full & u128::from(size.mask()));
                    assert_eq!(
                        sum.flags.contains(FlagSet::CARRY),
                        full > u128::from(size.mask())
                    );
                }
            }
        }
    }

    #[test]
    fn adc_carry_chain_test() {
        for size in OperandSize::ALL {
            for (a, b) in [(0, 0), (0x7F, 0), (size.mask(), 0), (size.mask(), size.mask())] {
                let vector = TestVector::binary(a, b).with_carry(true);
                let expected = eval(OperationKind::Adc, size, vector);
                let full = (u128::from(a) + u128::from(b) + 1) & u128::from(size.mask());
                assert_eq!(u128::from(expected.value), full);
            }
        }
        let wrap = eval(
            OperationKind::Adc,
            OperandSize::Byte,
            TestVector::binary(0xFF, 0).with_carry(true),
        );
        assert_eq!(wrap.value, 0);
        assert!(wrap.flags.contains(FlagSet::CARRY | FlagSet::ZERO | FlagSet::AUX_CARRY));
    }

    #[test]
    fn sbb_borrow_test() {
        let expected = eval(
            OperationKind::Sbb,
            OperandSize::Word,
            TestVector::binary(0, 0).with_carry(true),
        );
        assert_eq!(expected.value, 0xFFFF);
        assert!(expected.flags.contains(FlagSet::CARRY | FlagSet::SIGN | FlagSet::AUX_CARRY));
        assert!(!expected.flags.contains(FlagSet::OVERFLOW));

        let overflow = eval(
            OperationKind::Sbb,
            OperandSize::Byte,
            TestVector::binary(0x80, 0).with_carry(true),
        );
        assert_eq!(overflow.value, 0x7F);
        assert!(overflow.flags.contains(FlagSet::OVERFLOW));
        assert!(!overflow.flags.contains(FlagSet::CARRY));
    }

    #[test]
    fn overflow_test() {
        let expected = eval(
            OperationKind::Add,
            OperandSize::Byte,
            TestVector::binary(0x7F, 0x01),
        );
        assert!(expected.flags.contains(FlagSet::OVERFLOW | FlagSet::SIGN | FlagSet::AUX_CARRY));
        let expected = eval(
            OperationKind::Sub,
            OperandSize::DoubleWord,
            TestVector::binary(0x8000_0000, 1),
        );
        assert_eq!(expected.value, 0x7FFF_FFFF);
        assert!(expected.flags.contains(FlagSet::OVERFLOW));
        assert!(!expected.flags.contains(FlagSet::CARRY));
    }

    #[test]
    fn logic_clears_carry_and_overflow_test() {
        let incoming = TestVector::binary(0xFFFF, 0x8000).with_carry(true);
        for op in [OperationKind::And, OperationKind::Or, OperationKind::Xor] {
            let expected = evaluate(op, OperandSize::Word, &incoming);
            assert!(!expected.flags.intersects(FlagSet::CARRY | FlagSet::OVERFLOW));
        }
        let xor = evaluate(OperationKind::Xor, OperandSize::Word, &incoming);
        assert_eq!(xor.value, 0x7FFF);
        assert_eq!(xor.flags, FlagSet::PARITY);
    }

    #[test]
    fn cmp_keeps_destination_test() {
        let expected = eval(OperationKind::Cmp, OperandSize::Word, TestVector::binary(5, 7));
        assert_eq!(expected.value, 5);
        assert!(expected.flags.contains(FlagSet::CARRY | FlagSet::SIGN));
    }

    #[test]
    fn inc_dec_boundaries_test() {
        for size in OperandSize::ALL {
            let max = size.sign_bit() - 1;
            let inc = eval(OperationKind::Inc, size, TestVector::unary(max).with_carry(true));
            assert_eq!(inc.value, size.sign_bit());
            assert!(inc.flags.contains(FlagSet::OVERFLOW | FlagSet::SIGN | FlagSet::CARRY));

            let dec = eval(OperationKind::Dec, size, TestVector::unary(size.sign_bit()));
            assert_eq!(dec.value, max);
            assert!(dec.flags.contains(FlagSet::OVERFLOW));
            assert!(!dec.flags.contains(FlagSet::CARRY));

            let wrap = eval(OperationKind::Inc, size, TestVector::unary(size.mask()));
            assert_eq!(wrap.value, 0);
            assert!(!wrap.flags.contains(FlagSet::OVERFLOW));
            assert!(wrap.flags.contains(FlagSet::ZERO));
        }
    }

    #[test]
    fn not_keeps_flags_test() {
        let expected = eval(
            OperationKind::Not,
            OperandSize::Byte,
            TestVector::unary(0x0F).with_carry(true),
        );
        assert_eq!(expected.value, 0xF0);
        assert_eq!(expected.flags, FlagSet::CARRY);
    }

    #[test]
    fn result_flags_independent_of_operation_test() {
        let size = OperandSize::Word;
        let by_add = eval(OperationKind::Add, size, TestVector::binary(0x8000, 0x0003));
        let by_or = eval(OperationKind::Or, size, TestVector::binary(0x8000, 0x0003));
        let mask = FlagSet::ZERO | FlagSet::SIGN | FlagSet::PARITY;
        assert_eq!(by_add.value, by_or.value);
        assert_eq!(by_add.flags & mask, by_or.flags & mask);
        assert_eq!(by_add.flags & mask, result_flags(size, 0x8003));
    }

    #[test]
    fn evaluate_is_pure_test() {
        let vector = TestVector::binary(0x813f3421, 7).with_carry(true);
        for op in OperationKind::ALL {
            let first = evaluate(op, OperandSize::DoubleWord, &vector);
            let second = evaluate(op, OperandSize::DoubleWord, &vector);
            assert_eq!(first, second, "{}", op);
        }
    }

    #[test]
    fn shl_test() {
        let one = eval(OperationKind::Shl, OperandSize::Byte, TestVector::binary(0xC0, 1));
        assert_eq!(one.value, 0x80);
        assert!(one.flags.contains(FlagSet::CARRY | FlagSet::SIGN));
        assert!(!one.flags.contains(FlagSet::OVERFLOW));

        let out = eval(OperationKind::Shl, OperandSize::Byte, TestVector::binary(0xFF, 12));
        assert_eq!(out.value, 0);
        assert!(out.flags.contains(FlagSet::ZERO | FlagSet::PARITY));

        // masked to 1
        let masked = eval(OperationKind::Shl, OperandSize::Word, TestVector::binary(0x4000, 33));
        assert_eq!(masked.value, 0x8000);
        assert!(masked.flags.contains(FlagSet::OVERFLOW));
    }

    #[test]
    fn shr_sar_test() {
        let shr = eval(OperationKind::Shr, OperandSize::Word, TestVector::binary(0x8001, 1));
        assert_eq!(shr.value, 0x4000);
        assert!(shr.flags.contains(FlagSet::CARRY | FlagSet::OVERFLOW));

        let sar = eval(OperationKind::Sar, OperandSize::Word, TestVector::binary(0x8001, 1));
        assert_eq!(sar.value, 0xC000);
        assert!(sar.flags.contains(FlagSet::CARRY | FlagSet::SIGN));
        assert!(!sar.flags.contains(FlagSet::OVERFLOW));

        let fill = eval(OperationKind::Sar, OperandSize::Byte, TestVector::binary(0x80, 20));
        assert_eq!(fill.value, 0xFF);
    }

    #[test]
    fn zero_count_keeps_everything_test() {
        let vector = TestVector::binary(0x1234, 32).with_carry(true);
        for op in [OperationKind::Shl, OperationKind::Rcr, OperationKind::Rol] {
            let expected = evaluate(op, OperandSize::Word, &vector);
            assert_eq!(expected.value, 0x1234);
            assert_eq!(expected.flags, FlagSet::CARRY);
        }
    }

    #[test]
    fn rotate_test() {
        let rol = eval(OperationKind::Rol, OperandSize::Byte, TestVector::binary(0x81, 1));
        assert_eq!(rol.value, 0x03);
        assert_eq!(rol.flags, FlagSet::CARRY | FlagSet::OVERFLOW);

        let ror = eval(OperationKind::Ror, OperandSize::Byte, TestVector::binary(0x01, 1));
        assert_eq!(ror.value, 0x80);
        assert_eq!(ror.flags, FlagSet::CARRY | FlagSet::OVERFLOW);

        // a full turn still refreshes CF from the low bit
        let full = eval(OperationKind::Rol, OperandSize::Byte, TestVector::binary(0x01, 8));
        assert_eq!(full.value, 0x01);
        assert!(full.flags.contains(FlagSet::CARRY));
    }

    #[test]
    fn rotate_through_carry_test() {
        let rcl = eval(
            OperationKind::Rcl,
            OperandSize::Byte,
            TestVector::binary(0x80, 1).with_carry(true),
        );
        assert_eq!(rcl.value, 0x01);
        assert!(rcl.flags.contains(FlagSet::CARRY | FlagSet::OVERFLOW));

        let rcr = eval(
            OperationKind::Rcr,
            OperandSize::Word,
            TestVector::binary(0x0001, 1).with_carry(true),
        );
        assert_eq!(rcr.value, 0x8000);
        assert!(rcr.flags.contains(FlagSet::CARRY | FlagSet::OVERFLOW));

        // nine positions bring a byte back to where it started
        let nine = eval(
            OperationKind::Rcl,
            OperandSize::Byte,
            TestVector::binary(0x5A, 9).with_carry(true),
        );
        assert_eq!(nine.value, 0x5A);
        assert!(nine.flags.contains(FlagSet::CARRY));
    }

    #[test]
    fn double_shift_test() {
        let shld = eval(
            OperationKind::Shld,
            OperandSize::Word,
            TestVector::ternary(0x8001, 0xF000, 4),
        );
        assert_eq!(shld.value, 0x001F);
        assert!(!shld.flags.contains(FlagSet::CARRY));

        let shrd = eval(
            OperationKind::Shrd,
            OperandSize::Word,
            TestVector::ternary(0x0003, 0x0001, 1),
        );
        assert_eq!(shrd.value, 0x8001);
        assert!(shrd.flags.contains(FlagSet::CARRY | FlagSet::OVERFLOW | FlagSet::SIGN));
    }

    #[test]
    fn oversized_double_shift_is_total_test() {
        for count in 17..32 {
            let vector = TestVector::ternary(0x1234, 0x5678, count).with_carry(true);
            let expected = eval(OperationKind::Shld, OperandSize::Word, vector.clone());
            assert_eq!(expected.value, 0x1234);
            assert_eq!(expected.flags, FlagSet::CARRY);
            let expected = eval(OperationKind::Shrd, OperandSize::Word, vector);
            assert_eq!(expected.value, 0x1234);
        }
    }

    #[test]
    fn bit_test_family_test() {
        let size = OperandSize::Word;
        let vector = TestVector::binary(0x0010, 20);
        assert_eq!(eval(OperationKind::Bt, size, vector.clone()).value, 0x0010);
        assert_eq!(eval(OperationKind::Bt, size, vector.clone()).flags, FlagSet::CARRY);
        assert_eq!(eval(OperationKind::Bts, size, vector.clone()).value, 0x0010);
        assert_eq!(eval(OperationKind::Btr, size, vector.clone()).value, 0x0000);
        assert_eq!(eval(OperationKind::Btc, size, vector).value, 0x0000);
        let clear = eval(OperationKind::Bts, size, TestVector::binary(0, 3));
        assert_eq!(clear.value, 0x0008);
        assert!(!clear.flags.contains(FlagSet::CARRY));
    }

    #[test]
    fn bit_scan_test() {
        let size = OperandSize::DoubleWord;
        let zero = eval(OperationKind::Bsf, size, TestVector::binary(0x12345678, 0));
        assert_eq!(zero.value, 0x12345678);
        assert!(zero.flags.contains(FlagSet::ZERO));

        let bsf = eval(OperationKind::Bsf, size, TestVector::binary(0x12345678, 0x00340128));
        assert_eq!(bsf.value, 3);
        let bsr = eval(OperationKind::Bsr, size, TestVector::binary(0x12345678, 0x00340128));
        assert_eq!(bsr.value, 21);
        assert!(!bsr.flags.contains(FlagSet::ZERO));
    }
}
