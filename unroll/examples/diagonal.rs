//! one fixed-size structure per unrolled index.
//!
//! every power of two in 1..=64 instantiates its own `Diagonal<N>`; the
//! size is a const generic picked from the loop index.
//!
//! run: cargo run -p unroller --example diagonal

use unroller::{static_for, Advance, Compare, LoopDescriptor};

/// square diagonal matrix, diagonal stored inline.
struct Diagonal<const N: usize> {
    values: [f64; N],
}

impl<const N: usize> Diagonal<N> {
    fn filled(value: f64) -> Self {
        Self { values: [value; N] }
    }

    fn trace(&self) -> f64 {
        self.values.iter().sum()
    }
}

const POWERS: LoopDescriptor = LoopDescriptor::new(1, 64, 2, Compare::LessEqual, Advance::Mul);

fn main() {
    let a = 2.5;
    static_for!(POWERS, |n| {
        let d = Diagonal::<{ n as usize }>::filled(a);
        println!(
            "{:>2}x{:<2} diagonal ({} bytes), trace {:.2}",
            n,
            n,
            std::mem::size_of_val(&d),
            d.trace()
        );
    });
}
