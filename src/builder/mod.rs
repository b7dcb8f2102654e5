mod qr;

pub(crate) use qr::Module;
pub(crate) use qr::QR;

use crate::common::{
    codec::{encode, encode_with_version},
    ec::Block,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use crate::error::{QRError, QRResult};
use crate::BitStream;

pub struct QRBuilder<'a> {
    data: &'a [u8],
    ver: Option<Version>,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, ver: None, ecl: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, ver: Version) -> &mut Self {
        self.ver = Some(ver);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.ver = None;
        self
    }

    pub fn ec_level(&mut self, ecl: ECLevel) -> &mut Self {
        self.ecl = ecl;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.ver {
            Some(v) => format!("{{ Version: {:?}, Ec level: {:?} }}", *v, self.ecl),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ecl),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&mut self) -> QRResult<QR> {
        println!("\nConstructing QR {}...", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        if let Some(v) = self.ver {
            Version::new(v.0)?;
        }
        if let Some(m) = self.mask {
            MaskPattern::new(*m)?;
        }

        // Encode data optimally
        println!("Encoding data...");
        let (enc, ver) = match self.ver {
            Some(v) => (encode_with_version(self.data, v, self.ecl)?, v),
            None => {
                println!("Finding best version...");
                encode(self.data, self.ecl)?
            }
        };

        let data_len = self.data.len();
        let tot_cwds = ver.total_codewords();
        let data_cap = ver.data_capacity(self.ecl);
        let ec_cap = Self::ec_capacity(ver, self.ecl);

        println!("Constructing payload with ecc & interleaving...");
        let mut pld = BitStream::new(tot_cwds << 3);

        debug_assert!(
            enc.len() % 8 == 0,
            "Encoded data length {} is not byte aligned",
            enc.len()
        );

        let blks = Self::blockify(&enc.data()[..enc.len() >> 3], ver, self.ecl);

        // Interleave data & error correction codewords, and write into payload
        Self::interleave_into(&blks, &mut pld);

        // Construct QR
        println!("Constructing QR...");
        let mut qr = QR::new(ver, self.ecl);

        println!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        println!("Drawing encoding region...");
        qr.draw_encoding_region(pld);

        let mask = match self.mask {
            Some(m) => {
                println!("Apply mask {m:?}...");
                qr.apply_mask(m);
                m
            }
            None => {
                println!("Finding & applying best mask...");
                apply_best_mask(&mut qr)
            }
        };
        self.mask(mask);

        println!("\x1b[1;32mQR generated successfully!\n \x1b[0m");

        let tot_mods = ver.width() * ver.width();
        let dark_mods = qr.count_dark_modules();
        let lt_mods = tot_mods - dark_mods;

        println!("Report:");
        println!("{}", qr.metadata());
        println!("Data capacity: {}, Error Capacity: {}", data_cap, ec_cap);
        println!(
            "Data size: {}, Encoded size: {}, Compression: {}%",
            data_len,
            enc.len() >> 3,
            (enc.len() >> 3) * 100 / data_len
        );
        println!(
            "Dark Cells: {}, Light Cells: {}, Balance: {}\n",
            dark_mods,
            lt_mods,
            dark_mods * 100 / tot_mods
        );

        Ok(qr)
    }

    pub(crate) fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> [Option<Block>; 256] {
        // b1s = block1_size, b1c = block1_count
        let (b1s, b1c, b2s, b2c) = ver.data_codewords_per_block(ecl);
        let ec_len = ver.ecc_per_block(ecl);

        let b1_tot_sz = b1s * b1c;
        let tot_sz = b1_tot_sz + b2s * b2c;

        debug_assert!(
            tot_sz == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            tot_sz
        );

        let mut blks: [Option<Block>; 256] = [None; 256];
        data[..b1_tot_sz]
            .chunks(b1s)
            .enumerate()
            .for_each(|(i, d)| blks[i] = Some(Block::new(d, b1s + ec_len)));

        if b2s > 0 {
            data[b1_tot_sz..]
                .chunks(b2s)
                .enumerate()
                .for_each(|(i, d)| blks[i + b1c] = Some(Block::new(d, b2s + ec_len)));
        }

        blks
    }

    pub fn ec_capacity(ver: Version, ecl: ECLevel) -> usize {
        let p = match (*ver, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        let ec_bpb = ver.ecc_per_block(ecl);
        let (_, cnt1, _, cnt2) = ver.data_codewords_per_block(ecl);
        let ec_bytes = (cnt1 + cnt2) * ec_bpb;

        (ec_bytes - p) / 2
    }

    pub(crate) fn interleave_into(blks: &[Option<Block>], out: &mut BitStream) {
        // Interleaving data codewords
        let max_len = blks
            .iter()
            .filter_map(Option::as_ref)
            .map(Block::data_len)
            .max()
            .expect("Blocks is empty");
        for i in 0..max_len {
            for bl in blks.iter().filter_map(Option::as_ref) {
                if let Some(b) = bl.data().get(i) {
                    out.push_byte(*b)
                }
            }
        }

        // Interleaving ec codewords
        let ec_len = blks[0].unwrap().ec_len();
        for i in 0..ec_len {
            for bl in blks.iter().filter_map(Option::as_ref) {
                if let Some(b) = bl.ecc().get(i) {
                    out.push_byte(*b)
                }
            }
        }
    }
}
