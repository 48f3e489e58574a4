/// Host tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Lay out over the whole surface instead of inside its safe area.
    pub ignore_safe_area_insets: bool,

    /// Duration of curve animations built from this config, in seconds.
    pub default_animation_duration: f64,

    /// Damping ratio of spring animations.
    pub spring_damping: f64,

    /// Initial velocity of spring animations.
    pub spring_initial_velocity: f64,

    /// Log the widget tree at trace level after each layout.
    pub dump_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ignore_safe_area_insets: false,
            default_animation_duration: 0.3,
            spring_damping: 0.825,
            spring_initial_velocity: 0.55,
            dump_tree: false,
        }
    }
}
