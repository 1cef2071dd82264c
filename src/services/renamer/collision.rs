use std::collections::HashSet;

/// Names already handed out, per original parent directory.
///
/// Renamed entries are keyed by stem; verbatim (pass-through) entries by their
/// full name, so `Untitled.png` does not push a page called `Untitled` aside.
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    taken: HashSet<(String, String)>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_taken(&self, scope: &str, stem: &str, extension: &str) -> bool {
        self.taken.contains(&(scope.to_string(), stem.to_string()))
            || self
                .taken
                .contains(&(scope.to_string(), format!("{stem}{extension}")))
    }

    /// Reserve `stem` in `scope`, or the first free `"{stem} (n)"` for n = 1, 2, ...
    ///
    /// Returns the stem actually reserved.
    pub fn claim(&mut self, scope: &str, stem: &str, extension: &str) -> String {
        let mut candidate = stem.to_string();
        let mut counter = 1;
        while self.is_taken(scope, &candidate, extension) {
            candidate = format!("{stem} ({counter})");
            counter += 1;
        }

        self.taken.insert((scope.to_string(), candidate.clone()));
        candidate
    }

    /// Record a name that keeps its exported form.
    pub fn register_verbatim(&mut self, scope: &str, name: &str) {
        self.taken.insert((scope.to_string(), name.to_string()));
    }
}
