//! Ordered storage for the boxes of one image.

use super::geometry::BoundingBox;

/// Boxes for the current image, in insertion order.
///
/// The set has no notion of a selection; callers that hold an index must
/// adjust or drop it after [`LabelSet::remove_at`] and [`LabelSet::pop_last`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    boxes: Vec<BoundingBox>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a box and return its index.
    pub fn add(&mut self, bbox: BoundingBox) -> usize {
        self.boxes.push(bbox);
        self.boxes.len() - 1
    }

    /// Overwrite the box at `index`. Returns false if the index is out of range.
    pub fn replace(&mut self, index: usize, bbox: BoundingBox) -> bool {
        match self.boxes.get_mut(index) {
            Some(slot) => {
                *slot = bbox;
                true
            }
            None => false,
        }
    }

    /// Remove the box at `index`, shifting later boxes down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<BoundingBox> {
        (index < self.boxes.len()).then(|| self.boxes.remove(index))
    }

    /// Remove the most recently added box.
    pub fn pop_last(&mut self) -> Option<BoundingBox> {
        self.boxes.pop()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn get(&self, index: usize) -> Option<&BoundingBox> {
        self.boxes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BoundingBox> {
        self.boxes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }

    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

impl From<Vec<BoundingBox>> for LabelSet {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }
}

impl FromIterator<BoundingBox> for LabelSet {
    fn from_iter<I: IntoIterator<Item = BoundingBox>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabelSet {
        LabelSet::from(vec![
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(20, 20, 40, 40),
            BoundingBox::new(50, 50, 90, 90),
        ])
    }

    #[test]
    fn test_add_returns_new_index() {
        let mut set = LabelSet::new();
        assert_eq!(set.add(BoundingBox::new(0, 0, 10, 10)), 0);
        assert_eq!(set.add(BoundingBox::new(5, 5, 20, 20)), 1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_at_shifts_without_touching_others() {
        let mut set = sample();
        let removed = set.remove_at(1);
        assert_eq!(removed, Some(BoundingBox::new(20, 20, 40, 40)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(&BoundingBox::new(0, 0, 10, 10)));
        assert_eq!(set.get(1), Some(&BoundingBox::new(50, 50, 90, 90)));
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut set = sample();
        assert_eq!(set.remove_at(3), None);
        assert_eq!(set, sample());
    }

    #[test]
    fn test_pop_last_is_lifo() {
        let mut set = sample();
        assert_eq!(set.pop_last(), Some(BoundingBox::new(50, 50, 90, 90)));
        assert_eq!(set.pop_last(), Some(BoundingBox::new(20, 20, 40, 40)));
        assert_eq!(set.len(), 1);

        let mut empty = LabelSet::new();
        assert_eq!(empty.pop_last(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut set = sample();
        assert!(set.replace(0, BoundingBox::new(1, 1, 11, 11)));
        assert_eq!(set.get(0), Some(&BoundingBox::new(1, 1, 11, 11)));
        assert!(!set.replace(7, BoundingBox::new(1, 1, 11, 11)));
    }

    #[test]
    fn test_clear() {
        let mut set = sample();
        set.clear();
        assert!(set.is_empty());
    }
}
