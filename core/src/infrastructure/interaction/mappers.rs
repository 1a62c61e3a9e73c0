use crate::{
    domain::interaction::entities::{InteractionRecord, RecordSource, Severity},
    entity::supplement_interactions,
};

impl From<&supplement_interactions::Model> for InteractionRecord {
    fn from(model: &supplement_interactions::Model) -> Self {
        Self {
            id: model.id,
            supplement_a: model.supplement_a.clone(),
            supplement_b: model.supplement_b.clone(),
            severity: Severity::from_label(&model.severity),
            mechanism: model.mechanism.clone(),
            side_effects: model.side_effects.clone(),
            source: RecordSource::from(model.source.as_str()),
            last_updated: model.last_updated.to_utc(),
        }
    }
}

impl From<supplement_interactions::Model> for InteractionRecord {
    fn from(model: supplement_interactions::Model) -> Self {
        Self::from(&model)
    }
}
