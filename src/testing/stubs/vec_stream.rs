use crate::core::errors::DataError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use std::sync::Arc;

/// In-memory stream over raw value rows; rows are validated as they are pulled.
pub struct VecStream {
    pub header: Arc<InstanceHeader>,
    pub rows: Vec<Vec<usize>>,
    idx: usize,
}

impl VecStream {
    pub fn new(header: Arc<InstanceHeader>, rows: Vec<Vec<usize>>) -> Self {
        Self {
            header,
            rows,
            idx: 0,
        }
    }
}

impl Stream for VecStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.idx < self.rows.len()
    }

    fn next_instance(&mut self) -> Option<Result<Box<dyn Instance>, DataError>> {
        if !self.has_more_instances() {
            return None;
        }

        let row = self.rows[self.idx].clone();
        self.idx += 1;
        Some(
            DenseInstance::new(Arc::clone(&self.header), row)
                .map(|i| Box::new(i) as Box<dyn Instance>),
        )
    }

    fn restart(&mut self) -> Result<(), DataError> {
        self.idx = 0;
        Ok(())
    }
}
