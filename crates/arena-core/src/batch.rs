//! Batch payload model: orders, candidate solutions, and their transfers.

use core::{fmt, num::NonZeroU32};

use heapless::{String, Vec};

pub const MAX_ORDERS: usize = 24;
pub const MAX_SOLUTIONS: usize = 8;
pub const MAX_TRANSFERS: usize = 16;
pub const NAME_BYTES: usize = 24;
pub const TOKEN_BYTES: usize = 12;

/// Agent or account label.
pub type Name = String<NAME_BYTES>;
/// Token ticker such as `WETH`.
pub type TokenSymbol = String<TOKEN_BYTES>;

/// Positive batch number assigned by the data source, starting at 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BatchId(NonZeroU32);

impl BatchId {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Previous id, or `None` at batch 1.
    pub const fn checked_prev(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }

    pub fn checked_next(self) -> Option<Self> {
        self.get().checked_add(1).and_then(Self::new)
    }

    /// Parse a digit string. `"0"` and values past `u32::MAX` yield `None`.
    pub fn parse(digits: &str) -> Option<Self> {
        digits.parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatchError {
    Capacity,
    DuplicateAgent,
    LabelTooLong,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Capacity => "batch capacity exceeded",
            Self::DuplicateAgent => "duplicate solution agent",
            Self::LabelTooLong => "label too long",
        };
        f.write_str(label)
    }
}

fn label<const N: usize>(text: &str) -> Result<String<N>, BatchError> {
    String::try_from(text).map_err(|_| BatchError::LabelTooLong)
}

/// Order to be matched within a batch. Opaque to the controller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    pub id: u32,
    pub owner: Name,
    pub sell_token: TokenSymbol,
    pub buy_token: TokenSymbol,
    pub sell_amount: u64,
    pub buy_amount: u64,
}

impl Order {
    pub fn new(
        id: u32,
        owner: &str,
        sell_token: &str,
        buy_token: &str,
        sell_amount: u64,
        buy_amount: u64,
    ) -> Result<Self, BatchError> {
        Ok(Self {
            id,
            owner: label(owner)?,
            sell_token: label(sell_token)?,
            buy_token: label(buy_token)?,
            sell_amount,
            buy_amount,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Agent {
    pub name: Name,
}

/// One edge of a solution's transfer graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub from: Name,
    pub to: Name,
    pub token: TokenSymbol,
    pub amount: u64,
}

impl Transfer {
    pub fn new(from: &str, to: &str, token: &str, amount: u64) -> Result<Self, BatchError> {
        Ok(Self {
            from: label(from)?,
            to: label(to)?,
            token: label(token)?,
            amount,
        })
    }
}

/// Proposed execution of a batch, attributed to one agent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    pub agent: Agent,
    pub transfers: Vec<Transfer, MAX_TRANSFERS>,
}

impl Solution {
    pub fn new(agent_name: &str) -> Result<Self, BatchError> {
        Ok(Self {
            agent: Agent {
                name: label(agent_name)?,
            },
            transfers: Vec::new(),
        })
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name.as_str()
    }

    pub fn push_transfer(&mut self, transfer: Transfer) -> Result<(), BatchError> {
        self.transfers
            .push(transfer)
            .map_err(|_| BatchError::Capacity)
    }
}

/// Numbered collection of orders and candidate solutions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    batch_id: BatchId,
    orders: Vec<Order, MAX_ORDERS>,
    solutions: Vec<Solution, MAX_SOLUTIONS>,
}

impl Batch {
    pub const fn new(batch_id: BatchId) -> Self {
        Self {
            batch_id,
            orders: Vec::new(),
            solutions: Vec::new(),
        }
    }

    pub const fn batch_id(&self) -> BatchId {
        self.batch_id
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn push_order(&mut self, order: Order) -> Result<(), BatchError> {
        self.orders.push(order).map_err(|_| BatchError::Capacity)
    }

    /// Append a solution. Agent names must be unique within the batch.
    pub fn push_solution(&mut self, solution: Solution) -> Result<(), BatchError> {
        if self.solution(solution.agent_name()).is_some() {
            return Err(BatchError::DuplicateAgent);
        }
        self.solutions
            .push(solution)
            .map_err(|_| BatchError::Capacity)
    }

    pub fn solution(&self, agent_name: &str) -> Option<&Solution> {
        self.solutions
            .iter()
            .find(|solution| solution.agent_name() == agent_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_id_rejects_zero_and_overflow() {
        assert_eq!(BatchId::new(0), None);
        assert_eq!(BatchId::parse("0"), None);
        assert_eq!(BatchId::parse("4294967296"), None);
        assert_eq!(BatchId::parse("007").map(BatchId::get), Some(7));
        assert_eq!(BatchId::FIRST.checked_prev(), None);
        assert_eq!(BatchId::new(u32::MAX).and_then(BatchId::checked_next), None);
    }

    #[test]
    fn duplicate_agents_are_rejected() {
        let mut batch = Batch::new(BatchId::FIRST);
        batch.push_solution(Solution::new("Barter").unwrap()).unwrap();
        assert_eq!(
            batch.push_solution(Solution::new("Barter").unwrap()),
            Err(BatchError::DuplicateAgent)
        );
        assert_eq!(batch.solutions().len(), 1);
        assert!(batch.solution("Barter").is_some());
        assert!(batch.solution("Otex").is_none());
    }

    #[test]
    fn labels_beyond_capacity_fail() {
        let long = "an-agent-name-that-is-way-too-long";
        assert_eq!(Solution::new(long), Err(BatchError::LabelTooLong));
    }
}
