//! Drive capacity pool: daily reset, drains, recharges and status bands.

mod activity;
mod engine;
mod status;

pub use activity::{DrainActivity, RechargeActivity};
pub use engine::{
    sleep_adjustment, streak_bonus, MorningInputs, PoolConfig, PoolEngine, PoolEvent, PoolState,
    POOL_MAX, POOL_MIN,
};
pub use status::{status_message, PoolBand, PoolStatus};
