mod countdown;

pub(crate) use countdown::{aggregate_test, race_test};
