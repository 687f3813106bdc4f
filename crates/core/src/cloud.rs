use std::fmt;

/// Element identifier, unique within one snapshot.
///
/// Identifiers are only meaningful between snapshots that share a mesh.
/// Remeshing renumbers every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an element identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One element of a point cloud: a centroid carrying effective strain.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element identifier within its snapshot.
    pub id: ElementId,

    /// Element volume, when known.
    ///
    /// The centroid reduction leaves this as a placeholder, so it is usually
    /// `None`. It is carried through unchanged.
    pub volume: Option<f64>,

    /// Centroid coordinates `[x, y, z]`.
    pub centroid: [f64; 3],

    /// Accumulated effective strain.
    ///
    /// `None` when the state table holds no value for this element, which
    /// happens at the very first simulation step.
    pub strain: Option<f64>,
}

impl Element {
    /// Creates an element with no volume and no strain.
    #[must_use]
    pub fn new(id: u64, centroid: [f64; 3]) -> Self {
        Self {
            id: ElementId(id),
            volume: None,
            centroid,
            strain: None,
        }
    }

    /// Returns this element with the given strain.
    #[must_use]
    pub fn with_strain(self, strain: Option<f64>) -> Self {
        Self {
            strain,
            ..self
        }
    }

    /// Returns this element with the given volume.
    #[must_use]
    pub fn with_volume(self, volume: Option<f64>) -> Self {
        Self {
            volume,
            ..self
        }
    }
}

/// The full set of elements for one step, in table order.
///
/// Row order is preserved from load to save. Transfers never reorder a cloud.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    elements: Vec<Element>,
}

impl PointCloud {
    /// Creates a point cloud from its elements.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Returns the elements in table order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the cloud has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Returns the strain of every element, in table order.
    #[must_use]
    pub fn strains(&self) -> Vec<Option<f64>> {
        self.elements.iter().map(|e| e.strain).collect()
    }

    /// Returns a cloud with the same elements and each strain replaced.
    ///
    /// Strains are assigned in table order. If the iterator is shorter than the
    /// cloud, the remaining elements keep their strain.
    #[must_use]
    pub fn with_strains<I>(self, strains: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut elements = self.elements;
        for (element, strain) in elements.iter_mut().zip(strains) {
            element.strain = strain;
        }
        Self { elements }
    }

    /// Consumes the cloud and returns its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl FromIterator<Element> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
