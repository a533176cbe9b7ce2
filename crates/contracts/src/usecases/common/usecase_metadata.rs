/// Identification of a use case for menus and tab titles.
pub trait UseCaseMetadata {
    /// Index such as "u501".
    fn usecase_index() -> &'static str;

    /// Technical name such as "import_eleves".
    fn usecase_name() -> &'static str;

    /// Label shown in the UI.
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Tab key, e.g. "u501_import_eleves".
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
