/// One observed attribute change.
///
/// `target` is the nearest element whose attribute changed, never a text
/// node. Batches preserve the host's delivery order.
#[derive(Debug, Clone)]
pub struct ChangeNotification<E> {
    pub target: E,
    pub attribute_name: String,
}

impl<E> ChangeNotification<E> {
    pub fn new(target: E, attribute_name: impl Into<String>) -> Self {
        Self {
            target,
            attribute_name: attribute_name.into(),
        }
    }
}
