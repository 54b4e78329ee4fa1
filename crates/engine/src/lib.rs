pub use bill::Bill;
pub use error::EngineError;
pub use items::MenuItem;
pub use money::Money;
pub use participants::Participant;
pub use percent::Percent;
pub use totals::Totals;

mod bill;
mod error;
mod items;
mod money;
mod participants;
mod percent;
mod totals;

type ResultEngine<T> = Result<T, EngineError>;
