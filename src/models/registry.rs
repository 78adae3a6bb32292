// src/models/registry.rs

// Uma linha da folha de cálculo dos alojamentos (colunas `Registo` e `Nome`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub registo: String,
    pub nome: String,
}

impl RegistryRecord {
    pub fn new(registo: impl Into<String>, nome: impl Into<String>) -> Self {
        Self {
            registo: registo.into(),
            nome: nome.into(),
        }
    }
}
