use std::rc::Rc;

use conf_flags::{Describe, flatten};
use serde::{Deserialize, Serialize};

/// A skipped field may hold a type that has no flag representation.
#[derive(Default, Serialize, Deserialize, Describe)]
struct WithHandle {
    level: u8,
    #[conf_flags(skip)]
    #[serde(skip)]
    handle: Rc<()>,
}

fn main() {
    let _ = flatten::<WithHandle>();
}
