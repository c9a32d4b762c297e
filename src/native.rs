//! Runs the real instruction on the host CPU.
//!
//! Every form loads RFLAGS with the reserved bit and the incoming carry, runs
//! one register-to-register instruction, and reads RFLAGS straight back.

use crate::{
    executor::{Executor, ExecutorError, Observed, check_domain},
    operand::OperandSize,
    operation::OperationKind,
    vector::TestVector,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct NativeExecutor;

impl NativeExecutor {
    pub const fn is_available() -> bool {
        cfg!(target_arch = "x86_64")
    }
}

impl Executor for NativeExecutor {
    fn name(&self) -> &'static str {
        "native"
    }

    fn execute(
        &self,
        op: OperationKind,
        size: OperandSize,
        vector: &TestVector,
    ) -> Result<Observed, ExecutorError> {
        check_domain(op, size, vector)?;
        run(op, size, vector)
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn run(_: OperationKind, _: OperandSize, _: &TestVector) -> Result<Observed, ExecutorError> {
    Err(ExecutorError::Unavailable("native"))
}

#[cfg(target_arch = "x86_64")]
use host::run;

#[cfg(target_arch = "x86_64")]
mod host {
    use std::arch::asm;

    use super::*;
    use crate::flags::FlagSet;

    /// Bit 1 of RFLAGS always reads as set.
    const RESERVED: u64 = 0x2;

    macro_rules! flagged {
        ($insn:literal, [$($part:literal),+], $fin:ident, $($operands:tt)*) => {{
            let fout: u64;
            // SAFETY: the template only reads and writes the listed registers,
            // RFLAGS, and the one stack slot it pushes then pops.
            unsafe {
                asm!(
                    "push {fin}",
                    "popfq",
                    concat!($insn, " ", $($part),+),
                    "pushfq",
                    "pop {fout}",
                    fin = in(reg) $fin,
                    fout = lateout(reg) fout,
                    $($operands)*
                );
            }
            fout
        }};
    }

    macro_rules! unary {
        ($insn:literal, $m:literal, $dest:ident, $fin:ident) => {
            flagged!(
                $insn,
                ["{dest:", $m, "}"],
                $fin,
                dest = inout(reg) $dest,
            )
        };
    }

    macro_rules! binary {
        ($insn:literal, $m:literal, $dest:ident, $src:ident, $fin:ident) => {
            flagged!(
                $insn,
                ["{dest:", $m, "}, {src:", $m, "}"],
                $fin,
                dest = inout(reg) $dest,
                src = in(reg) $src,
            )
        };
    }

    macro_rules! shift {
        ($insn:literal, $m:literal, $dest:ident, $count:ident, $fin:ident) => {
            flagged!(
                $insn,
                ["{dest:", $m, "}, cl"],
                $fin,
                dest = inout(reg) $dest,
                in("cl") $count,
            )
        };
    }

    macro_rules! double_shift {
        ($insn:literal, $m:literal, $dest:ident, $src:ident, $count:ident, $fin:ident) => {
            flagged!(
                $insn,
                ["{dest:", $m, "}, {src:", $m, "}, cl"],
                $fin,
                dest = inout(reg) $dest,
                src = in(reg) $src,
                in("cl") $count,
            )
        };
    }

    // register modifiers: al, ax, eax, rax
    macro_rules! sized {
        ($size:expr, $form:ident, $insn:literal, $($arg:ident),+) => {
            match $size {
                OperandSize::Byte => $form!($insn, "l", $($arg),+),
                OperandSize::Word => $form!($insn, "x", $($arg),+),
                OperandSize::DoubleWord => $form!($insn, "e", $($arg),+),
                OperandSize::QuadWord => $form!($insn, "r", $($arg),+),
            }
        };
    }

    macro_rules! sized_wide {
        ($op:expr, $size:expr, $form:ident, $insn:literal, $($arg:ident),+) => {
            match $size {
                OperandSize::Byte => {
                    return Err(ExecutorError::Unsupported {
                        op: $op,
                        size: OperandSize::Byte,
                    })
                }
                OperandSize::Word => $form!($insn, "x", $($arg),+),
                OperandSize::DoubleWord => $form!($insn, "e", $($arg),+),
                OperandSize::QuadWord => $form!($insn, "r", $($arg),+),
            }
        };
    }

    pub(super) fn run(
        op: OperationKind,
        size: OperandSize,
        vector: &TestVector,
    ) -> Result<Observed, ExecutorError> {
        use OperationKind::*;

        let fin = RESERVED | u64::from(vector.carry());
        let mut dest = vector.operand(0);
        let src = vector.operand(1);
        let count = vector.operand(1) as u8;
        let double_count = vector.operand(2) as u8;

        let fout = match op {
            Add => sized!(size, binary, "add", dest, src, fin),
            Sub => sized!(size, binary, "sub", dest, src, fin),
            And => sized!(size, binary, "and", dest, src, fin),
            Or => sized!(size, binary, "or", dest, src, fin),
            Xor => sized!(size, binary, "xor", dest, src, fin),
            Cmp => sized!(size, binary, "cmp", dest, src, fin),
            Adc => sized!(size, binary, "adc", dest, src, fin),
            Sbb => sized!(size, binary, "sbb", dest, src, fin),
            Inc => sized!(size, unary, "inc", dest, fin),
            Dec => sized!(size, unary, "dec", dest, fin),
            Neg => sized!(size, unary, "neg", dest, fin),
            Not => sized!(size, unary, "not", dest, fin),
            Shl => sized!(size, shift, "shl", dest, count, fin),
            Shr => sized!(size, shift, "shr", dest, count, fin),
            Sar => sized!(size, shift, "sar", dest, count, fin),
            Rol => sized!(size, shift, "rol", dest, count, fin),
            Ror => sized!(size, shift, "ror", dest, count, fin),
            Rcl => sized!(size, shift, "rcl", dest, count, fin),
            Rcr => sized!(size, shift, "rcr", dest, count, fin),
            Shld => sized_wide!(op, size, double_shift, "shld", dest, src, double_count, fin),
            Shrd => sized_wide!(op, size, double_shift, "shrd", dest, src, double_count, fin),
            Bt => sized_wide!(op, size, binary, "bt", dest, src, fin),
            Bts => sized_wide!(op, size, binary, "bts", dest, src, fin),
            Btr => sized_wide!(op, size, binary, "btr", dest, src, fin),
            Btc => sized_wide!(op, size, binary, "btc", dest, src, fin),
            Bsf => sized_wide!(op, size, binary, "bsf", dest, src, fin),
            Bsr => sized_wide!(op, size, binary, "bsr", dest, src, fin),
        };

        Ok(Observed {
            value: size.truncate(dest),
            flags: FlagSet::from_eflags(fout),
        })
    }
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::flags::FlagSet;

    fn native(op: OperationKind, size: OperandSize, vector: TestVector) -> Observed {
        NativeExecutor.execute(op, size, &vector).unwrap()
    }

    #[test]
    fn native_add_word_test() {
        let observed = native(
            OperationKind::Add,
            OperandSize::Word,
            TestVector::binary(0x1234, 0x0128),
        );
        assert_eq!(observed.value, 0x135C);
        assert_eq!(observed.flags, FlagSet::PARITY);
    }

    #[test]
    fn native_carry_in_test() {
        let observed = native(
            OperationKind::Adc,
            OperandSize::Byte,
            TestVector::binary(0xFF, 0).with_carry(true),
        );
        assert_eq!(observed.value, 0);
        assert!(observed.flags.contains(FlagSet::CARRY | FlagSet::ZERO));
    }

    #[test]
    fn native_counts_test() {
        let observed = native(
            OperationKind::Shl,
            OperandSize::QuadWord,
            TestVector::binary(1, 63),
        );
        assert_eq!(observed.value, 1 << 63);
        let observed = native(
            OperationKind::Shld,
            OperandSize::DoubleWord,
            TestVector::ternary(0x21ad3d34, 0x12345678, 4),
        );
        assert_eq!(observed.value, 0x1ad3d341);
    }

    #[test]
    fn native_high_bits_are_dropped_test() {
        let observed = native(
            OperationKind::Not,
            OperandSize::Byte,
            TestVector::unary(0xABCD_0F),
        );
        assert_eq!(observed.value, 0xF0);
    }
}
