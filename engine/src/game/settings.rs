use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{Cell, CollisionPolicy, FieldSize, Heading};

pub const MIN_FIELD_SIDE: u32 = 2;
pub const MAX_FIELD_SIDE: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub field_width: u32,
    pub field_height: u32,
    pub initial_length: u32,
    pub start_x: u32,
    pub start_y: u32,
    pub start_heading: Heading,
    pub collision_policy: CollisionPolicy,
}

impl GameSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width as i32, self.field_height as i32)
    }

    pub fn start_cell(&self) -> Cell {
        Cell::new(self.start_x as i32, self.start_y as i32)
    }

    /// Cell the head occupies right after a (re)spawn.
    pub fn initial_head(&self) -> Cell {
        let (dx, dy) = self.start_heading.delta();
        let steps = self.initial_length.saturating_sub(1) as i32;
        let tail = self.start_cell();
        Cell::new(tail.x + dx * steps, tail.y + dy * steps)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 20,
            initial_length: 10,
            start_x: 2,
            start_y: 3,
            start_heading: Heading::Right,
            collision_policy: CollisionPolicy::Respawn,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < MIN_FIELD_SIDE || self.field_height < MIN_FIELD_SIDE {
            return Err(format!(
                "field dimensions must be at least {}x{}",
                MIN_FIELD_SIDE, MIN_FIELD_SIDE
            ));
        }
        if self.field_width > MAX_FIELD_SIDE || self.field_height > MAX_FIELD_SIDE {
            return Err(format!(
                "field dimensions must not exceed {}x{}",
                MAX_FIELD_SIDE, MAX_FIELD_SIDE
            ));
        }
        if self.initial_length == 0 {
            return Err("initial_length must be greater than 0".to_string());
        }

        let field = self.field_size();
        if self.initial_length as usize >= field.area() {
            return Err("initial_length must leave at least one free cell for the apple".to_string());
        }
        if !field.contains(self.start_cell()) {
            return Err(format!("start cell {} is outside the field", self.start_cell()));
        }
        if !field.contains(self.initial_head()) {
            return Err(format!(
                "initial snake of length {} heading {} does not fit in the field",
                self.initial_length, self.start_heading
            ));
        }
        Ok(())
    }
}
