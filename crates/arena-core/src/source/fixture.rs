use super::{BatchSource, FetchError};
use crate::batch::{Batch, BatchError, BatchId, Order, Solution, Transfer};

const AGENTS: [&str; 6] = ["Barter", "Gnosis", "Otex", "Quasimodo", "Laertes", "Seasolver"];
const TOKENS: [&str; 5] = ["WETH", "USDC", "DAI", "COW", "GNO"];
const TRADERS: [&str; 4] = ["0xa1ce", "0xb0b0", "0xca70", "0xd00d"];
const SETTLEMENT: &str = "Settlement";
const MIN_ORDERS: u64 = 2;
const MAX_SOLVERS: u64 = 4;

/// Deterministic batches `1..=last_batch`, derived from the batch id alone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixtureBatchSource {
    last_batch: u32,
}

impl FixtureBatchSource {
    pub const fn new(last_batch: u32) -> Self {
        Self { last_batch }
    }

    pub const fn last_batch(&self) -> u32 {
        self.last_batch
    }

    pub fn build_batch(&self, batch_id: BatchId) -> Result<Batch, BatchError> {
        let seed = mix(batch_id.get() as u64);
        let mut batch = Batch::new(batch_id);

        let order_count = MIN_ORDERS + seed % 4;
        for index in 0..order_count {
            let lane = seed.rotate_right((index * 7) as u32);
            let sell = (lane % TOKENS.len() as u64) as usize;
            // Offset 1..=4 keeps the buy side on a different token.
            let buy = (sell + 1 + (index as usize % 4)) % TOKENS.len();
            let owner = TRADERS[(batch_id.get() as usize + index as usize) % TRADERS.len()];
            let sell_amount = 1_000 * (1 + (lane >> 8) % 50);
            let buy_amount = 1_000 * (1 + (lane >> 16) % 50);
            batch.push_order(Order::new(
                batch_id.get().wrapping_mul(100).wrapping_add(index as u32),
                owner,
                TOKENS[sell],
                TOKENS[buy],
                sell_amount,
                buy_amount,
            )?)?;
        }

        let solver_count = 1 + (seed >> 8) % MAX_SOLVERS;
        for rank in 0..solver_count {
            let agent = AGENTS[(batch_id.get() as usize + rank as usize) % AGENTS.len()];
            let mut solution = Solution::new(agent)?;
            for order in batch.orders() {
                // Lower-ranked solvers hand back a little less surplus.
                let payout = order.buy_amount.saturating_sub(rank * 10);
                solution.push_transfer(Transfer::new(
                    order.owner.as_str(),
                    SETTLEMENT,
                    order.sell_token.as_str(),
                    order.sell_amount,
                )?)?;
                solution.push_transfer(Transfer::new(
                    SETTLEMENT,
                    order.owner.as_str(),
                    order.buy_token.as_str(),
                    payout,
                )?)?;
            }
            batch.push_solution(solution)?;
        }

        Ok(batch)
    }
}

impl BatchSource for FixtureBatchSource {
    fn fetch_batch(&self, batch_id: BatchId) -> Result<Batch, FetchError> {
        if batch_id.get() > self.last_batch {
            return Err(FetchError::NotFound);
        }
        Ok(self.build_batch(batch_id)?)
    }
}

fn mix(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> BatchId {
        BatchId::new(raw).unwrap()
    }

    #[test]
    fn batches_past_the_end_are_not_found() {
        let source = FixtureBatchSource::new(3);
        assert!(source.fetch_batch(id(3)).is_ok());
        assert_eq!(source.fetch_batch(id(4)), Err(FetchError::NotFound));
    }

    #[test]
    fn batches_are_deterministic_and_well_formed() {
        let source = FixtureBatchSource::new(50);
        for raw in 1..=50 {
            let batch = source.fetch_batch(id(raw)).unwrap();
            assert_eq!(batch.batch_id(), id(raw));
            assert!(batch.orders().len() >= 2);
            assert!(!batch.solutions().is_empty());
            for order in batch.orders() {
                assert_ne!(order.sell_token, order.buy_token);
            }
            for solution in batch.solutions() {
                assert_eq!(solution.transfers.len(), batch.orders().len() * 2);
            }
            assert_eq!(source.fetch_batch(id(raw)), Ok(batch));
        }
    }
}
