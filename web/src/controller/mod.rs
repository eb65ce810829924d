pub(crate) mod health_check_controller;
pub(crate) mod invitation_controller;
pub(crate) mod invite_controller;
pub(crate) mod qr_controller;
