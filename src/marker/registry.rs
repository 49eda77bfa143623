use indexmap::IndexMap;
use log::debug;

use crate::params::Param;

use super::dispatch::Marker;
use super::isotope::IsotopeMarker;
use super::traits::{MarkerError, PeakMarker};

/// A function that builds a marker in its default configuration
pub type MarkerConstructor = fn() -> Marker;

/// Look up marker constructors by name.
///
/// The registry is an ordinary value: build it once, populate it, and hand it
/// out by reference to whatever needs to create markers by name.
/// [`MarkerRegistry::default`] knows the markers this crate provides.
#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    constructors: IndexMap<String, MarkerConstructor>,
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        let mut this = Self::new();
        this.register(IsotopeMarker::NAME, || Marker::Isotope(IsotopeMarker::new()));
        this
    }
}

impl MarkerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Register `constructor` under `name`, returning the constructor it
    /// replaces, if any
    pub fn register<S: Into<String>>(
        &mut self,
        name: S,
        constructor: MarkerConstructor,
    ) -> Option<MarkerConstructor> {
        self.constructors.insert(name.into(), constructor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// The registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Create the marker registered under `name` in its default configuration
    pub fn create(&self, name: &str) -> Result<Marker, MarkerError> {
        match self.constructors.get(name) {
            Some(constructor) => {
                debug!("Creating peak marker {name}");
                Ok(constructor())
            }
            None => Err(MarkerError::UnknownMarker(name.to_string())),
        }
    }

    /// Create the marker registered under `name` and configure it with `params`
    pub fn create_with(&self, name: &str, params: &[Param]) -> Result<Marker, MarkerError> {
        let mut marker = self.create(name)?;
        marker.set_parameters(params)?;
        Ok(marker)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::marker::PeakMarks;
    use crate::params::ParamList;
    use crate::peaks::Spectrum;

    /// Marks every peak brighter than a fixed threshold
    #[derive(Debug)]
    struct BrightMarker;

    impl PeakMarker for BrightMarker {
        fn name(&self) -> &str {
            "BrightMarker"
        }

        fn apply(
            &self,
            marks: &mut PeakMarks,
            spectrum: &mut Spectrum,
        ) -> Result<(), MarkerError> {
            spectrum.sort_by_position()?;
            marks.extend(spectrum.iter().filter(|p| p.intensity > 50.0).map(|p| p.mz));
            Ok(())
        }

        fn parameters(&self) -> ParamList {
            ParamList::new()
        }

        fn set_parameters(&mut self, params: &[Param]) -> Result<(), MarkerError> {
            match params.first() {
                Some(p) => Err(crate::params::ParamError::Unknown(p.name.clone()).into()),
                None => Ok(()),
            }
        }
    }

    #[test_log::test]
    fn test_default_registry() {
        let registry = MarkerRegistry::default();
        assert!(registry.contains(IsotopeMarker::NAME));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["IsotopeMarker"]);

        let marker = registry.create("IsotopeMarker").unwrap();
        assert_eq!(marker.name(), "IsotopeMarker");
        assert!(marker.as_isotope().is_some());

        let err = registry.create("NeutralLossMarker").unwrap_err();
        assert_eq!(
            err,
            MarkerError::UnknownMarker("NeutralLossMarker".to_string())
        );
    }

    #[test_log::test]
    fn test_create_with_params() {
        let registry = MarkerRegistry::default();
        let marker = registry
            .create_with(IsotopeMarker::NAME, &[Param::new_key_value("marks", 3)])
            .unwrap();
        assert_eq!(marker.as_isotope().unwrap().params().marks, 3);
        assert!(registry
            .create_with(IsotopeMarker::NAME, &[Param::new_key_value("marks", "x")])
            .is_err());
    }

    #[test_log::test]
    fn test_register_custom() {
        let mut registry = MarkerRegistry::new();
        assert!(registry.is_empty());
        registry.register("BrightMarker", || Marker::Custom(Box::new(BrightMarker)));
        registry.register(IsotopeMarker::NAME, || IsotopeMarker::new().into());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["BrightMarker", "IsotopeMarker"]
        );

        let marker = registry.create("BrightMarker").unwrap();
        assert_eq!(format!("{marker:?}"), "Custom(\"BrightMarker\")");
        let mut spectrum: Spectrum = vec![(300.0, 80.0f32), (200.0, 10.0), (100.0, 60.0)]
            .into_iter()
            .collect();
        let marks = marker.mark(&mut spectrum).unwrap();
        assert_eq!(marks.to_vec(), vec![100.0, 300.0]);
    }
}
