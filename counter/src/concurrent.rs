mod work_counter;
mod work_guard;

pub use self::{work_counter::*, work_guard::*};
