#[cfg(test)]
mod tests {
    use ray_stats::CollectionGate;

    #[test]
    fn resolve() {
        for token in ["1", "true", "TRUE"] {
            assert!(CollectionGate::resolve(Some(token)).is_enabled(), "{}", token);
        }
        for token in ["", "0", "True", "yes", "on", " 1", "1 ", "true\n", "false", "2"] {
            assert!(!CollectionGate::resolve(Some(token)).is_enabled(), "{:?}", token);
        }
        assert!(!CollectionGate::resolve(None).is_enabled());
    }

    #[test]
    fn constructors() {
        assert!(CollectionGate::enabled().is_enabled());
        assert!(!CollectionGate::disabled().is_enabled());
        assert_eq!(CollectionGate::default(), CollectionGate::disabled());
        assert_eq!(CollectionGate::from(true), CollectionGate::enabled());
        assert_eq!(CollectionGate::from(false), CollectionGate::disabled());
    }
}
