use tracing::trace;

pub const SELECTOR: &str = "a.back-to-the-top";
pub const ACTIVE_CLASS: &str = "active";

/// Something holding a set of CSS classes.
pub trait ClassList {
    type Error;

    fn add_class(&self, class: &str) -> Result<(), Self::Error>;

    fn remove_class(&self, class: &str) -> Result<(), Self::Error>;
}

pub struct BackToTop<T> {
    target: T,
}

impl<T: ClassList> BackToTop<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// `scrolled` is the vertical page offset, `position` the viewport
    /// height. Returns whether the class is now set.
    pub fn on_scroll(&self, scrolled: f64, position: f64) -> Result<bool, T::Error> {
        let active = scrolled > position;
        trace!(scrolled, position, active, "scroll");
        if active {
            self.target.add_class(ACTIVE_CLASS)?;
        } else {
            self.target.remove_class(ACTIVE_CLASS)?;
        }
        Ok(active)
    }

    pub fn on_click(&self) -> Result<(), T::Error> {
        trace!("click");
        self.target.remove_class(ACTIVE_CLASS)
    }
}
