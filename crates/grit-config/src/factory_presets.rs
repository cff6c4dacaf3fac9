//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available without external
//! files. Each one is a starting point for a common use of the distortion.

use crate::Preset;

/// Factory preset identifiers, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["init", "edge", "crunch", "parallel", "fuzz"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("edge", EDGE_PRESET),
    ("crunch", CRUNCH_PRESET),
    ("parallel", PARALLEL_PRESET),
    ("fuzz", FUZZ_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Layout defaults - dry signal at unity gain"

[settings]
drive_db = 0.0
mix = 0.0
output_db = 0.0
threshold = 1.0
model = "hard_clip"
"#;

const EDGE_PRESET: &str = r#"
name = "Edge"
description = "Light drive blended half wet, just catching the peaks"

[settings]
drive_db = 6.0
mix = 0.5
output_db = -1.0
threshold = 0.8
model = "hard_clip"
"#;

const CRUNCH_PRESET: &str = r#"
name = "Crunch"
description = "Fully wet, driven into a moderate clip"

[settings]
drive_db = 12.0
mix = 1.0
output_db = -4.0
threshold = 0.5
model = "hard_clip"
"#;

const PARALLEL_PRESET: &str = r#"
name = "Parallel"
description = "Heavy clip tucked under the dry signal"

[settings]
drive_db = 18.0
mix = 0.35
output_db = -2.0
threshold = 0.3
model = "hard_clip"
"#;

const FUZZ_PRESET: &str = r#"
name = "Fuzz"
description = "Maximum drive into a low ceiling, output raised to compensate"

[settings]
drive_db = 24.0
mix = 1.0
output_db = 9.0
threshold = 0.2
model = "hard_clip"
"#;

/// All factory presets, in listing order.
///
/// # Example
///
/// ```rust
/// use grit_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {:?}", preset.name, preset.description);
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by identifier or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use grit_config::get_factory_preset;
///
/// let crunch = get_factory_preset("Crunch").unwrap();
/// assert_eq!(crunch.settings.drive_db, 12.0);
/// assert!(get_factory_preset("nonexistent").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name = name.trim();
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// `true` if the name matches a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
