#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InitialHolderState {}

impl InitialHolderState {
    pub fn new() -> Self {
        Self {}
    }
}
