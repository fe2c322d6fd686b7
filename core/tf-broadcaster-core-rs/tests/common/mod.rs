use tf_broadcaster::{PanelError, TransformRecord, TransformSink, TransformType};

pub fn setup_logger() {
    let _ = env_logger::Builder::new()
        .filter(None, log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Keeps every message handed to it
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Vec<(TransformType, Vec<TransformRecord>)>,
}

impl RecordingSink {
    pub fn on(&self, channel: TransformType) -> Vec<&TransformRecord> {
        self.sent
            .iter()
            .filter(|(c, _)| *c == channel)
            .flat_map(|(_, transforms)| transforms.iter())
            .collect()
    }
}

impl TransformSink for RecordingSink {
    fn send(
        &mut self,
        channel: TransformType,
        transforms: &[TransformRecord],
    ) -> Result<(), PanelError> {
        self.sent.push((channel, transforms.to_vec()));
        Ok(())
    }
}
