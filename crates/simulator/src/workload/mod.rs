//! Producer/consumer workload.
//!
//! Two thread slots share a bounded queue. Each side cycles through
//! Start → Process(es) → Notify, and each wakes the other when it goes idle
//! or when the other is idle.

mod prodcon;
mod state;
mod work;

pub use prodcon::ProdConWorkload;
pub use state::ProdConState;
pub use work::{ProdConWork, WorkKind};

use pipesim_core::{ThreadIndex, TypeTag};

/// Thread slot running the producer.
pub const PRODUCER_THREAD: ThreadIndex = 0;

/// Thread slot running the consumer.
pub const CONSUMER_THREAD: ThreadIndex = 1;

/// Number of thread slots the workload uses.
pub const THREAD_COUNT: u32 = 2;

/// Start work (waking a side up).
pub const TYPE_START: TypeTag = TypeTag::new(1);

/// Notify work (kicking the other side).
pub const TYPE_NOTIFY: TypeTag = TypeTag::new(2);

/// Process work (producing or consuming one item).
pub const TYPE_PROCESS: TypeTag = TypeTag::new(3);

/// Number of type tags, including the idle tag.
pub const TYPE_COUNT: u32 = 4;

/// Display names, indexed by type tag.
pub const TYPE_NAMES: [&str; TYPE_COUNT as usize] = ["Null", "Start", "Notify", "Process"];

/// Display names, indexed by thread.
pub const THREAD_NAMES: [&str; THREAD_COUNT as usize] = ["Producer", "Consumer"];
