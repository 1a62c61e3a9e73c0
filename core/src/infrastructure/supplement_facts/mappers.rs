use crate::{domain::supplement_facts::entities::SupplementFact, entity::supplement_facts};

impl From<&supplement_facts::Model> for SupplementFact {
    fn from(model: &supplement_facts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            aliases: model.aliases.clone(),
            typical_use: model.typical_use.clone(),
            typical_dosage: model.typical_dosage.clone(),
            source: model.source.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<supplement_facts::Model> for SupplementFact {
    fn from(model: supplement_facts::Model) -> Self {
        Self::from(&model)
    }
}
