//! The standard families and the vectors each one runs.

use crate::{
    case::TestCase,
    operand::OperandSize,
    operation::OperationKind,
    registry::{Registry, RegistrationError, RegistryBuilder},
    vector::{
        alu_vectors, double_shift_vectors, scan_vectors, shift_vectors, unary_vectors,
        with_both_carries,
    },
};

const WIDE: [OperandSize; 3] = [
    OperandSize::Word,
    OperandSize::DoubleWord,
    OperandSize::QuadWord,
];

/// Counts past 31 only reach the 64-bit forms.
fn count_range(size: OperandSize) -> u64 {
    match size {
        OperandSize::QuadWord => 64,
        _ => 32,
    }
}

macro_rules! register_families {
    ($builder:expr, $sizes:expr, [$($op:ident),+], $vectors:expr) => {
        for size in $sizes {
            $(
                $builder.register(TestCase::new(OperationKind::$op, size, $vectors(size)));
            )+
        }
    };
}

pub fn register_all(builder: &mut RegistryBuilder) {
    register_families!(builder, OperandSize::ALL, [Add, Sub, Xor, And, Or, Cmp], |_| alu_vectors());
    register_families!(builder, OperandSize::ALL, [Adc, Sbb], |_| with_both_carries(alu_vectors()));
    register_families!(builder, OperandSize::ALL, [Inc, Dec, Neg, Not], |_| {
        with_both_carries(unary_vectors())
    });
    register_families!(builder, OperandSize::ALL, [Shl, Shr, Sar, Rol, Ror], |size| {
        shift_vectors(count_range(size))
    });
    register_families!(builder, OperandSize::ALL, [Rcl, Rcr], |size| {
        with_both_carries(shift_vectors(count_range(size)))
    });
    register_families!(builder, WIDE, [Shld, Shrd], |size: OperandSize| {
        double_shift_vectors(u64::from(size.bits()))
    });
    register_families!(builder, WIDE, [Bt, Bts, Btr, Btc], |size| {
        shift_vectors(count_range(size))
    });
    register_families!(builder, WIDE, [Bsf, Bsr], |_| scan_vectors());
}

pub fn standard_registry() -> Result<Registry, RegistrationError> {
    let mut builder = RegistryBuilder::new();
    register_all(&mut builder);
    builder.build()
}
