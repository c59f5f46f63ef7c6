pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod livekit;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

use std::rc::Rc;

use crate::call::RoomConnector;

/// Room client for the current build target.
pub fn platform_connector() -> Rc<dyn RoomConnector> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(livekit::LiveKitConnector::new())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(native::NativeRoomConnector)
    }
}
