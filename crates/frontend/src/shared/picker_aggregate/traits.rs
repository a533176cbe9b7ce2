use contracts::domain::common::EntityRef;

/// Base trait for items a picker can select.
pub trait AggregatePickerResult {
    fn id(&self) -> String;
    fn display_name(&self) -> String;
}

/// Items shown as a code/description table.
pub trait TableDisplayable: AggregatePickerResult {
    fn code(&self) -> String;
    fn description(&self) -> String;
}

impl AggregatePickerResult for EntityRef {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn display_name(&self) -> String {
        self.display()
    }
}

impl TableDisplayable for EntityRef {
    fn code(&self) -> String {
        self.code.clone().unwrap_or_default()
    }

    fn description(&self) -> String {
        self.libelle.clone()
    }
}
