pub(crate) mod calendar;
pub(crate) mod dashboard;
pub(crate) mod expenses;
