// settings type for integrators which don't have anything to configure
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullSettings {}
