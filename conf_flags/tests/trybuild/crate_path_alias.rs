use conf_flags as flags;
use serde::{Deserialize, Serialize};

/// Verifies that `#[conf_flags(crate = "flags")]` routes generated code
/// through the alias.
#[derive(Default, Serialize, Deserialize, flags::Describe)]
#[conf_flags(crate = "flags")]
struct AliasedConfig {
    /// Listen port.
    port: u16,
    name: String,
}

fn main() {
    let mut config = AliasedConfig::default();
    let set = flags::FlagSet::from_config(&mut config, &flags::BuildOptions::default());
    let _: Result<flags::FlagSet<'_>, flags::FlagError> = set;
}
