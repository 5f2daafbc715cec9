use crate::schema::tile::identity::TileId;
use crate::schema::tile::result::TileParseResult;


pub trait TileParseObserver {
    fn on_parse(
        &mut self,
        id: &TileId,
        parse_result: &TileParseResult,
    ) -> ();
}
