pub mod irq;
pub mod mutex;
pub mod semaphore;

pub use irq::{InterruptController, MutexIrq, MutexGuardIrq};
pub use mutex::{Mutex, MutexGuard};
pub use semaphore::Semaphore;
