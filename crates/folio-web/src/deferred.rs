//! Holding area for values that cannot be dropped inside the callback that
//! owns them, such as a fired timer's own closure.

/// Values parked until the next sweep.
#[derive(Debug)]
pub struct DeferredDrop<T> {
    items: Vec<T>,
    sweep_armed: bool,
}

impl<T> Default for DeferredDrop<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sweep_armed: false,
        }
    }
}

impl<T> DeferredDrop<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `item`. Returns true when the caller has to arm a sweep; further
    /// items parked before that sweep runs ride along with it.
    pub fn park(&mut self, item: T) -> bool {
        self.items.push(item);
        !std::mem::replace(&mut self.sweep_armed, true)
    }

    /// Drop everything parked so far. Returns how many values were released.
    pub fn sweep(&mut self) -> usize {
        self.sweep_armed = false;
        let released = self.items.len();
        self.items.clear();
        released
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
