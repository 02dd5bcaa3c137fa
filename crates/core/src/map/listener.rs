use crate::{CubeCoordinate, HexagonalMap};

/// Gets told whenever tiles on a map change. Listeners are called
/// synchronously, after the map has been updated and before the mutating call
/// returns. See [HexagonalMap::add_listener].
///
/// Any closure with the right signature is a listener:
///
/// ```
/// use hexmap::{CubeCoordinate, HexagonalMap, HexagonalMapListener};
/// use std::rc::Rc;
///
/// # #[derive(Clone, Debug)]
/// # struct Plains;
/// # impl hexmap::Terrain for Plains {
/// #     fn id(&self) -> &str { "plains" }
/// #     fn is_move_obstacle(&self) -> bool { false }
/// #     fn is_view_obstacle(&self) -> bool { false }
/// #     fn movement_cost(&self) -> u32 { 1 }
/// # }
/// let mut map = HexagonalMap::<Plains>::new(Default::default(), Vec::new());
/// let listener: Rc<dyn HexagonalMapListener<Plains>> =
///     Rc::new(|_: &HexagonalMap<Plains>, changed: &[CubeCoordinate]| {
///         println!("{} tiles changed", changed.len());
///     });
/// map.add_listener(listener);
/// map.set(CubeCoordinate::ORIGIN, Plains);
/// ```
pub trait HexagonalMapListener<T> {
    fn tiles_changed(&self, map: &HexagonalMap<T>, locations: &[CubeCoordinate]);
}

impl<T, F> HexagonalMapListener<T> for F
where
    F: Fn(&HexagonalMap<T>, &[CubeCoordinate]),
{
    fn tiles_changed(&self, map: &HexagonalMap<T>, locations: &[CubeCoordinate]) {
        self(map, locations)
    }
}
