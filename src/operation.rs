use serde::{Deserialize, Serialize};
use std::fmt;

/// The card operations exposed by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    List,
    Get,
    Cancel,
    Freeze,
    Unfreeze,
    Fund,
    Withdraw,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Create,
        Operation::List,
        Operation::Get,
        Operation::Cancel,
        Operation::Freeze,
        Operation::Unfreeze,
        Operation::Fund,
        Operation::Withdraw,
    ];

    /// Label attached to errors produced by this operation.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::List => "List",
            Operation::Get => "Get",
            Operation::Cancel => "Cancel",
            Operation::Freeze => "Freeze",
            Operation::Unfreeze => "Unfreeze",
            Operation::Fund => "Fund",
            Operation::Withdraw => "Withdraw",
        }
    }

    /// Key into the endpoint table.
    pub fn endpoint_key(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Cancel => "terminate",
            Operation::Freeze => "freeze",
            Operation::Unfreeze => "unfreeze",
            Operation::Fund => "fund",
            Operation::Withdraw => "withdraw",
        }
    }

    /// Message sent with the usage beacon.
    pub fn tracking_message(&self) -> &'static str {
        match self {
            Operation::Create => "Create-card",
            Operation::List => "List-all-cards",
            Operation::Get => "Fetch-card",
            Operation::Cancel => "Delete-card",
            Operation::Freeze => "Block-card",
            Operation::Unfreeze => "Unblock-card",
            Operation::Fund => "Fund-card",
            Operation::Withdraw => "Withdraw-card-funds",
        }
    }

    /// Suffix appended after the card id for operations addressed by URL.
    pub(crate) fn card_path_suffix(&self) -> Option<&'static str> {
        match self {
            Operation::Cancel => Some("terminate"),
            Operation::Freeze => Some("status/block"),
            Operation::Unfreeze => Some("status/unblock"),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
