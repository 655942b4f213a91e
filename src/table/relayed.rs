use crate::Power;
use crate::dispatch::Receipt;

/// Outcome of a serve.
#[derive(Debug)]
pub struct Serve {
    pub power: Power,
    pub receipt: Receipt,
}

/// Outcome of handing a ball to the table.
#[derive(Debug)]
pub enum Relayed {
    Forwarded(Receipt),
    /// The match had already ended.
    Dropped,
}

impl Relayed {
    pub fn into_receipt(self) -> Option<Receipt> {
        match self {
            Self::Forwarded(receipt) => Some(receipt),
            Self::Dropped => None,
        }
    }
}
