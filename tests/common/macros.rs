/// Asserts that the live population matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($model:expr, $count:expr) => {
        assert_eq!($model.live_count(), $count, "Population count mismatch");
    };
}

/// Asserts that exactly one terminal event was emitted and that it matches `$pattern`.
#[macro_export]
macro_rules! assert_terminal_once {
    ($events:expr, $pattern:pat) => {
        let terminal: Vec<_> = $events.iter().filter(|e| e.is_terminal()).collect();
        assert_eq!(terminal.len(), 1, "expected one terminal event, got {:?}", terminal);
        assert!(
            matches!(terminal[0], $pattern),
            "unexpected terminal event {:?}",
            terminal[0]
        );
    };
}

/// Counts events matching `$pattern`.
#[macro_export]
macro_rules! count_events {
    ($events:expr, $pattern:pat) => {
        $events.iter().filter(|e| matches!(e, $pattern)).count()
    };
}
