mod charge;
mod department;
mod money;

pub use charge::*;
pub use department::*;
pub use money::*;
