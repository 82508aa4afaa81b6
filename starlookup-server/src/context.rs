use crate::lookup::Gateway;

#[derive(Clone, Debug)]
pub struct Context {
    pub gateway: Gateway,
}
