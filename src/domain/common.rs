/// Anything identified by a user-visible name, such as an emotion.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// One-line label used by list views and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
