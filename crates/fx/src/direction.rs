/// Direction of a payment event relative to the counterparty balance.
///
/// `Settle` is the direction that increases what a customer owes the
/// organization (a collection) or decreases what the organization owes a
/// supplier (a payment). `Refund` is the opposite flow.
///
/// The sign is applied once, to the canonical original amount, before any
/// conversion math, so stored converted amounts are reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Settle,
    Refund,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Settle => 1.0,
            Self::Refund => -1.0,
        }
    }

    /// Applies the direction sign to a positive input amount.
    #[must_use]
    pub fn signed(self, amount: f64) -> f64 {
        amount * self.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_flips_the_sign_once() {
        assert_eq!(Direction::Settle.signed(50.0), 50.0);
        assert_eq!(Direction::Refund.signed(50.0), -50.0);
    }
}
