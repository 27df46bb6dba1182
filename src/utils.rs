pub(crate) fn default<T: Default>() -> T {
    T::default()
}
