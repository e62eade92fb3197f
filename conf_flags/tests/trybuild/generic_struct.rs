use conf_flags::{Describe, flatten};
use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Describe)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Default, Serialize, Deserialize, Describe)]
struct Pair<A, B> {
    primary: A,
    fallback: Option<B>,
    weights: Vec<u32>,
}

fn main() {
    let _ = flatten::<Pair<Endpoint, u8>>();
    let _ = flatten::<Pair<Endpoint, Endpoint>>();
}
