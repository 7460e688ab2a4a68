//! Room capacity advice

use gymtrack_api::{CapacityWarning, Room};

/// Whether admitting one more occupant meets or exceeds the room's capacity.
/// `open_in_room` is the number of open sessions before the admission.
pub fn would_exceed(room: &Room, open_in_room: usize) -> bool {
    open_in_room >= room.capacity as usize
}

/// Advisory warning for a check-in into `room`, if any
pub fn capacity_warning(room: &Room, open_in_room: usize) -> Option<CapacityWarning> {
    would_exceed(room, open_in_room).then(|| CapacityWarning {
        room_id: room.id.clone(),
        occupancy: open_in_room,
        capacity: room.capacity,
    })
}
