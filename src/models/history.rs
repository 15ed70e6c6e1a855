// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo snapshots of the rectangle list.

use super::annotation::Rectangle;

/// History system for undo/redo functionality.
#[derive(Debug, Clone)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Vec<Rectangle>>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Vec<Rectangle>>,
    /// Maximum history size
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 50, // Keep last 50 states
        }
    }

    /// Save current state before making a change
    pub fn push(&mut self, rectangles: Vec<Rectangle>) {
        self.undo_stack.push(rectangles);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new change invalidates anything that was undone
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    pub fn undo(&mut self, current: Vec<Rectangle>) -> Option<Vec<Rectangle>> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Redo: restore next state
    pub fn redo(&mut self, current: Vec<Rectangle>) -> Option<Vec<Rectangle>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Bounds, RectId};

    fn rects(n: u64) -> Vec<Rectangle> {
        (0..n)
            .map(|i| Rectangle::new(RectId(i), Bounds::new(0.1, 0.1, 0.2, 0.2)))
            .collect()
    }

    #[test]
    fn test_undo_redo_flow() {
        let mut history = History::new();
        history.push(rects(0));
        history.push(rects(1));

        assert_eq!(history.undo(rects(2)), Some(rects(1)));
        assert_eq!(history.undo(rects(1)), Some(rects(0)));
        assert_eq!(history.undo(rects(0)), None);

        assert_eq!(history.redo(rects(0)), Some(rects(1)));
        history.push(rects(1));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for _ in 0..80 {
            history.push(rects(1));
        }
        let mut undone = 0;
        while history.undo(Vec::new()).is_some() {
            undone += 1;
        }
        assert_eq!(undone, 50);
    }
}
