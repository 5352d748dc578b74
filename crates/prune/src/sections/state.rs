// ABOUTME: Heading-nesting state machine deciding which elements belong to a removed section.
// ABOUTME: Normal or Removing(level); a heading at or above the level closes the range and is re-evaluated.

/// What to do with the element just fed to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Keep,
    Remove,
}

/// Scan state over the flattened document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    Normal,
    /// Inside a removed section opened by a heading of this level.
    Removing(u8),
}

impl SectionState {
    /// Feed a heading of `level` whose text does or does not match a title.
    pub fn on_heading(&mut self, level: u8, matches: bool, remove_heading: bool) -> Step {
        if let SectionState::Removing(current) = *self {
            if level > current {
                return Step::Remove;
            }
            // Same or shallower heading closes the range; it may open a new one.
            *self = SectionState::Normal;
        }

        if matches {
            *self = SectionState::Removing(level);
            if remove_heading {
                return Step::Remove;
            }
        }
        Step::Keep
    }

    /// Feed any non-heading element.
    pub fn on_content(&self) -> Step {
        match self {
            SectionState::Normal => Step::Keep,
            SectionState::Removing(_) => Step::Remove,
        }
    }

    pub fn is_removing(&self) -> bool {
        matches!(self, SectionState::Removing(_))
    }
}
