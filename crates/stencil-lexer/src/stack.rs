/// Minimal LIFO container backed by a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrow the top element, or `None` when empty.
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Items are pushed in iteration order, so the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_pop_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.top(), Some(&1));
        assert_eq!(stack.pop(), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_stack() {
        let mut stack: Stack<u8> = Stack::default();
        assert_eq!(stack.top(), None);
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_from_iter_last_on_top() {
        let stack: Stack<&str> = ["bottom", "top"].into_iter().collect();
        assert_eq!(stack.top(), Some(&"top"));
    }
}
