pub const EPSILON: f64 = 1.0e-9;

pub trait ApproxEq<Rhs = Self> {
    fn approx_eq(&self, rhs: &Rhs) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, rhs: &Self) -> bool {
        (self - rhs).abs() < EPSILON
    }
}

#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        assert!(
            lhs.approx_eq(&rhs),
            "assertion failed: `left ~= right`\n  left: `{:?}`\n right: `{:?}`",
            lhs,
            rhs
        );
    }};
}
