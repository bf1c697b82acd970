//! Device globals written by the host before a check runs.

use std::sync::RwLock;

use crate::{
    error::{Error, Result},
    simple::Simple,
};

#[derive(Debug)]
/// A named global holding the device byte image of a [`Simple`].
///
/// The host binds a value before the device-side check runs, the device
/// only ever loads it. The lock guarantees that a load never observes a
/// partially written image.
pub struct GlobalSlot {
    name: String,
    image: RwLock<Option<[u8; Simple::SIZE]>>,
}

impl GlobalSlot {
    #[must_use]
    /// Creates an unbound global with the given `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: RwLock::new(None),
        }
    }

    #[must_use]
    /// The name of the global.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marshals `value` and stores its byte image, replacing any earlier one.
    ///
    /// # Errors
    /// Returns [`Error::Poisoned`] iff an earlier writer panicked.
    pub fn bind(&self, value: &Simple) -> Result<()> {
        let mut image = self.image.write().map_err(|_| self.poisoned())?;
        *image = Some(value.to_device_bytes());

        log::debug!("bound {value} to global `{}`", self.name);

        Ok(())
    }

    /// Loads and unmarshals the most recently bound value.
    ///
    /// # Errors
    /// Returns [`Error::Unbound`] if nothing has been bound yet and
    /// [`Error::Poisoned`] iff a writer panicked.
    pub fn load(&self) -> Result<Simple> {
        let image = self.image.read().map_err(|_| self.poisoned())?;

        match image.as_ref() {
            Some(image) => Simple::from_device_bytes(image),
            None => Err(Error::Unbound {
                name: self.name.clone(),
            }),
        }
    }

    fn poisoned(&self) -> Error {
        Error::Poisoned {
            name: self.name.clone(),
        }
    }
}
