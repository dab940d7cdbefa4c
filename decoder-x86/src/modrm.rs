//! ModR/M, SIB and displacement.

use decoder::Error;

use crate::decode::Cursor;
use crate::instruction::{DispSize, Instruction, ModRm, Sib};

/// Reads a ModR/M byte and whatever SIB byte and displacement it calls for.
pub(crate) fn parse(cursor: &mut Cursor, inst: &mut Instruction) -> Result<(), Error> {
    let modrm = ModRm(cursor.byte()?);
    inst.modrm = Some(modrm);

    if modrm.is_register() {
        return Ok(());
    }

    let disp = if inst.address_size() == 2 {
        match (modrm.mod_(), modrm.rm()) {
            (0b00, 0b110) | (0b10, _) => DispSize::Word,
            (0b01, _) => DispSize::Byte,
            _ => DispSize::None,
        }
    } else {
        let mut disp = match modrm.mod_() {
            0b01 => DispSize::Byte,
            0b10 => DispSize::Dword,
            _ => DispSize::None,
        };

        if modrm.rm() == 0b100 {
            let sib = Sib(cursor.byte()?);
            inst.sib = Some(sib);

            // no base register
            if modrm.mod_() == 0b00 && sib.base() == 0b101 {
                disp = DispSize::Dword;
            }
        } else if modrm.mod_() == 0b00 && modrm.rm() == 0b101 {
            disp = DispSize::Dword;
        }

        disp
    };

    inst.displacement = cursor.read_le(disp.bytes())?;
    inst.disp_mask = disp;
    Ok(())
}

/// `0F 20..=0F 23` ignore `mod` and always name two registers.
pub(crate) fn parse_register_only(
    cursor: &mut Cursor,
    inst: &mut Instruction,
) -> Result<(), Error> {
    inst.modrm = Some(ModRm(cursor.byte()?));
    Ok(())
}
