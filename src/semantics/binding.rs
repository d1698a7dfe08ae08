use std::collections::HashMap;

use crate::error::StoreError;

/// Per-face integer store for semantic bindings.
///
/// Implementations hold the raw stored values; the sentinel `-1` and
/// absence both mean "unbound" and are normalized by [`BindingStore`].
pub trait FaceBindingStore {
    /// Reads the raw stored value for `face`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot serve the read.
    fn read(&self, face: u32) -> Result<Option<i64>, StoreError>;

    /// Writes the raw value for `face`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot accept the write.
    fn write(&mut self, face: u32, value: i64) -> Result<(), StoreError>;
}

/// Typed per-face attribute layer: the preferred backend.
///
/// A fixed-size integer array over the mesh's faces, `-1` for unbound.
pub struct AttributeLayer<'a> {
    values: &'a mut Vec<i64>,
}

impl<'a> AttributeLayer<'a> {
    /// Wraps an existing attribute layer.
    #[must_use]
    pub fn new(values: &'a mut Vec<i64>) -> Self {
        Self { values }
    }
}

impl FaceBindingStore for AttributeLayer<'_> {
    fn read(&self, face: u32) -> Result<Option<i64>, StoreError> {
        self.values
            .get(face as usize)
            .copied()
            .map(Some)
            .ok_or(StoreError::FaceOutOfRange { face })
    }

    fn write(&mut self, face: u32, value: i64) -> Result<(), StoreError> {
        let slot = self
            .values
            .get_mut(face as usize)
            .ok_or(StoreError::FaceOutOfRange { face })?;
        *slot = value;
        Ok(())
    }
}

/// Ad hoc per-face property map: the legacy fallback backend.
pub struct PropertyLayer<'a> {
    values: &'a mut HashMap<u32, i64>,
}

impl<'a> PropertyLayer<'a> {
    /// Wraps an existing per-face property map.
    #[must_use]
    pub fn new(values: &'a mut HashMap<u32, i64>) -> Self {
        Self { values }
    }
}

impl FaceBindingStore for PropertyLayer<'_> {
    fn read(&self, face: u32) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(&face).copied())
    }

    fn write(&mut self, face: u32, value: i64) -> Result<(), StoreError> {
        self.values.insert(face, value);
        Ok(())
    }
}

/// Dual-backend binding store.
///
/// The preferred backend is selected by availability at construction
/// time; reads and writes fall back to the legacy backend when the
/// preferred one is absent or fails.
pub struct BindingStore<P, F> {
    preferred: Option<P>,
    fallback: F,
}

impl<P: FaceBindingStore, F: FaceBindingStore> BindingStore<P, F> {
    /// Creates a store from an optional preferred backend and a fallback.
    #[must_use]
    pub fn new(preferred: Option<P>, fallback: F) -> Self {
        Self {
            preferred,
            fallback,
        }
    }

    /// Resolves the semantic index previously bound to `face`.
    ///
    /// `-1` and absence both mean unbound. Failures in either backend
    /// are recovered by falling through; they never surface as errors.
    #[must_use]
    pub fn resolve_index(&self, face: u32) -> Option<u32> {
        let raw = self.read_raw(face)?;
        u32::try_from(raw).ok()
    }

    fn read_raw(&self, face: u32) -> Option<i64> {
        if let Some(preferred) = &self.preferred {
            match preferred.read(face) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(%error, face, "preferred binding store read failed");
                }
            }
        }
        match self.fallback.read(face) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(%error, face, "fallback binding store read failed");
                None
            }
        }
    }

    /// Writes `index` as the binding for `face`.
    ///
    /// # Errors
    ///
    /// Returns an error only when every available backend rejects the
    /// write; callers tolerate that case.
    pub fn write_index(&mut self, face: u32, index: u32) -> Result<(), StoreError> {
        let value = i64::from(index);
        if let Some(preferred) = &mut self.preferred {
            match preferred.write(face, value) {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::debug!(%error, face, "preferred binding store write failed");
                }
            }
        }
        self.fallback.write(face, value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::semantics::UNBOUND;

    use super::*;

    /// Fake backend with scriptable failure.
    struct Fake {
        values: HashMap<u32, i64>,
        fail: bool,
    }

    impl Fake {
        fn ok() -> Self {
            Self {
                values: HashMap::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                values: HashMap::new(),
                fail: true,
            }
        }

        fn with(face: u32, value: i64) -> Self {
            let mut fake = Self::ok();
            fake.values.insert(face, value);
            fake
        }
    }

    impl FaceBindingStore for Fake {
        fn read(&self, face: u32) -> Result<Option<i64>, StoreError> {
            if self.fail {
                return Err(StoreError::Unavailable("fake".into()));
            }
            Ok(self.values.get(&face).copied())
        }

        fn write(&mut self, face: u32, value: i64) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Unavailable("fake".into()));
            }
            self.values.insert(face, value);
            Ok(())
        }
    }

    // ── Reads ──

    #[test]
    fn read_prefers_the_preferred_backend() {
        let store = BindingStore::new(Some(Fake::with(0, 7)), Fake::with(0, 9));

        assert_eq!(store.resolve_index(0), Some(7));
    }

    #[test]
    fn read_falls_back_when_preferred_fails() {
        let store = BindingStore::new(Some(Fake::failing()), Fake::with(0, 9));

        assert_eq!(store.resolve_index(0), Some(9));
    }

    #[test]
    fn read_falls_back_when_preferred_is_absent() {
        let store = BindingStore::<Fake, _>::new(None, Fake::with(0, 3));

        assert_eq!(store.resolve_index(0), Some(3));
    }

    #[test]
    fn unbound_sentinel_resolves_to_none() {
        // -1 in the preferred backend means unbound; the fallback is not
        // consulted.
        let store = BindingStore::new(Some(Fake::with(0, -1)), Fake::with(0, 5));

        assert_eq!(store.resolve_index(0), None);
    }

    #[test]
    fn both_backends_failing_resolves_to_none() {
        let store = BindingStore::new(Some(Fake::failing()), Fake::failing());

        assert_eq!(store.resolve_index(0), None);
    }

    // ── Writes ──

    #[test]
    fn write_lands_in_the_preferred_backend() {
        let mut store = BindingStore::new(Some(Fake::ok()), Fake::ok());

        store.write_index(2, 4).unwrap();

        assert_eq!(store.preferred.unwrap().values.get(&2), Some(&4));
        assert!(store.fallback.values.is_empty());
    }

    #[test]
    fn write_falls_back_when_preferred_fails() {
        let mut store = BindingStore::new(Some(Fake::failing()), Fake::ok());

        store.write_index(2, 4).unwrap();

        assert_eq!(store.fallback.values.get(&2), Some(&4));
    }

    #[test]
    fn write_reports_an_error_when_every_backend_fails() {
        let mut store = BindingStore::new(Some(Fake::failing()), Fake::failing());

        assert!(store.write_index(2, 4).is_err());
    }

    // ── Concrete backends ──

    #[test]
    fn attribute_layer_rejects_out_of_range_faces() {
        let mut values = vec![UNBOUND; 2];
        let mut layer = AttributeLayer::new(&mut values);

        assert!(layer.read(5).is_err());
        assert!(layer.write(5, 1).is_err());
        layer.write(1, 3).unwrap();
        assert_eq!(layer.read(1).unwrap(), Some(3));
    }

    #[test]
    fn property_layer_treats_absence_as_unbound() {
        let mut values = HashMap::new();
        let mut layer = PropertyLayer::new(&mut values);

        assert_eq!(layer.read(0).unwrap(), None);
        layer.write(0, 2).unwrap();
        assert_eq!(layer.read(0).unwrap(), Some(2));
    }
}
