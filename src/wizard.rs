//! The player character and its clamped position accessor.
//!
//! Position is private: every movement path (keys, gravity, session reset)
//! goes through `set_x` / `set_y`, which pin the wizard inside the play area.

use crate::config::Config;
use crate::entities::Rect;

#[derive(Clone, Debug)]
pub struct Wizard {
    x: i32,
    y: i32,
    /// Set while the fire animation is showing; blocks re-firing.
    pub firing: bool,
    pub visible: bool,
}

impl Wizard {
    /// A hidden wizard placed at `(x, y)`, clamped into the play area.
    pub fn at(x: i32, y: i32, config: &Config) -> Self {
        let mut wizard = Wizard {
            x: 0,
            y: 0,
            firing: false,
            visible: false,
        };
        wizard.set_x(x, config);
        wizard.set_y(y, config);
        wizard
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, new_x: i32, config: &Config) {
        self.x = new_x.clamp(0, max_x(config));
    }

    pub fn set_y(&mut self, new_y: i32, config: &Config) {
        self.y = new_y.clamp(0, floor_y(config));
    }

    pub fn bounds(&self, config: &Config) -> Rect {
        Rect::new(self.x, self.y, config.wizard_size())
    }

    pub fn is_on_floor(&self, config: &Config) -> bool {
        self.y == floor_y(config)
    }
}

fn max_x(config: &Config) -> i32 {
    (config.area_width - config.wizard_width).max(0)
}

/// Largest y the wizard can occupy: standing on the bottom edge.
pub fn floor_y(config: &Config) -> i32 {
    (config.area_height - config.wizard_height).max(0)
}
