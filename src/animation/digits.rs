//! Deterministic pseudo-randomness read from a fixed digit string.
//!
//! Every value is a pure function of `(index, time)`, so re-sampling a frame always reproduces
//! the same scene and frames can be sampled in any order.

use crate::foundation::error::{FrameloomError, FrameloomResult};

/// Cyclic view over a string of decimal digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitSequence {
    digits: &'static [u8],
}

impl Default for DigitSequence {
    fn default() -> Self {
        Self::PI
    }
}

impl DigitSequence {
    /// The first digits of π, starting with the leading `3`.
    pub const PI: Self = Self {
        digits: PI_DIGITS.as_bytes(),
    };

    /// Wrap a custom digit string. Every character must be an ASCII digit.
    pub fn new(digits: &'static str) -> FrameloomResult<Self> {
        if digits.is_empty() {
            return Err(FrameloomError::validation("digit sequence must be non-empty"));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(FrameloomError::validation(format!(
                "digit sequence contains non-digit character {bad:?}"
            )));
        }
        Ok(Self {
            digits: digits.as_bytes(),
        })
    }

    /// Number of digits before the sequence repeats.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always `false`; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digit at `index`, reading cyclically.
    pub fn digit_at(&self, index: u64) -> u8 {
        let i = (index % self.digits.len() as u64) as usize;
        self.digits[i] - b'0'
    }

    /// Center of the digit's tenth of the unit interval: `(d + 0.5) / 10`, always in `(0, 1)`.
    pub fn unit(&self, index: u64) -> f64 {
        (f64::from(self.digit_at(index)) + 0.5) / 10.0
    }

    /// Map the digit at `index` into `[min, max)`.
    pub fn uniform(&self, index: u64, min: f64, max: f64) -> f64 {
        min + self.unit(index) * (max - min)
    }

    /// Like [`uniform`](Self::uniform), blended with a slow phase term driven by `time_ms`.
    ///
    /// The digit carries weight `0.6` and `sin(time_ms·0.001 + index)·0.5 + 0.5` carries `0.4`.
    pub fn uniform_timed(&self, index: u64, time_ms: f64, min: f64, max: f64) -> f64 {
        let phase = (time_ms * 0.001 + index as f64).sin() * 0.5 + 0.5;
        let combined = self.unit(index) * 0.6 + phase * 0.4;
        min + combined * (max - min)
    }

    /// Box–Muller sample with mean `mean` and standard deviation `std`.
    pub fn normal(&self, index: u64, time_ms: f64, mean: f64, std: f64) -> f64 {
        let i1 = index
            .wrapping_mul(7)
            .wrapping_add(floor_index(time_ms * 0.001));
        let i2 = index
            .wrapping_mul(13)
            .wrapping_add(floor_index(time_ms * 0.0005));
        let u1 = self.unit(i1);
        let u2 = self.unit(i2);
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2 + time_ms * 0.001).cos();
        mean + z * std
    }

    /// Pick one of `items` by the digit at `index`; `None` when `items` is empty.
    pub fn choose<'a, T>(&self, index: u64, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(usize::from(self.digit_at(index)) % items.len())
    }
}

fn floor_index(v: f64) -> u64 {
    if v.is_finite() { v.floor().max(0.0) as u64 } else { 0 }
}

#[rustfmt::skip]
const PI_DIGITS: &str = concat!(
    "3141592653589793238462643383279502884197169399375105820974944592307816406286208998628034",
    "8253421170679821480865132823066470938446095505822317253594081284811174502841027019385211",
    "0555964462294895493038196442881097566593344612847564823378678316527120190914564856692346",
    "0348610454326648213393607260249141273724587006606315588174881520920962829254091715364367",
    "8925903600113305305488204665213841469519415116094330572703657595919530921861173819326117",
    "9310511854807446237996274956735188575272489122793818301194912983367336244065664308602139",
    "4946395224737190702179860943702770539217176293176752384674818467669405132000568127145263",
    "5608277857713427577896091736371787214684409012249534301465495853710507922796892589235420",
    "1995611212902196086403441815981362977477130996051870721134999999837297804995105973173281",
    "6096318595024459455346908302642522308253344685035261931188171010003137838752886587533208",
    "3814206171776691473035982534904287554687311595628638823537875937519577818577805321712268",
    "0661300192787661119590921642019893809525720106548586327886593615338182796823030195203530",
    "1852968995773622599413891249721775283479131515574857242454150695950829533116861727855889",
    "0750983817546374649393192550604009277016711390098488240128583616035637076601047101819429",
    "5559619894676783744944825537977472684710404753464620804668425906949129331367702898915210",
    "4752162056966024058038150193511253382430035587640247496473263914199272604269922796782354",
    "7816360093417216412199245863150302861829745557067498385054945885869269956909250520091388",
    "3772383631692831979118375472417279015988827284172415756848050909518019181171883935676253",
    "2653463964700534996322074927668974082521624459646907861777804328989965167596089235158864",
    "7766817891289646076123443568635818348495415663114941565275793430583426665014443626452160",
    "6069610416278085277900575696093194485293608176620251211251856537669051391821368139517605",
    "4619160841672854450697378272511412323911318044545814789055716627485798918941197382689467",
    "6543508829652309837783381563590785020587853795143056018378547250495569691830627948421162",
    "0604823535677401108953495308244096905879252526757272423334955003310033802245352038585318",
    "3565321166838828673235649564183224486644401266604423768206785365104564879501244533875983",
    "7372988374826067217868933554429448136856300986201245961897839226125978723434145412359028",
    "5869120232985624031061946217302052648948032440265028824553615246191157381054910893518997",
    "0042331758039914539871665283826055205386448665536768273324409413586791842096331886231021",
    "1720775048051655163255272328919956363740814964054495407624345833096935618848658786512482",
    "5423535970387438448672356373502090988738934074264014918457668337702487395957000206515140",
    "9131069358841774788279099893567873374304715546489097600116208098234273930931037313988321",
    "9975924333395810383848345103438339668398889769164348327182731036185133618982572130968067",
    "5496011655638515610213965863116326163785963284595365944544268669683538319565899213413967",
    "2768922452436561397650749263916537982970116250782511499810526498691935874176863519858991",
    "9457947202287827824376204308407774233820538814985841301360914735884537378778248302958777",
    "8433101484126593072136115604719451902977266329691632952606606243003521384969566649244530",
    "3324547790539895060078005770535545089780034586935864562037004964204967824628042921153193",
    "1363862000132802769601404681178202190821404069458190189301839977870303618325384504724188",
    "0463372671014565238646448391880604704181361320302361756252655130254845869594087707554724",
    "3950024583209356612523575959824825088683264284065574469230605374449913394421411102680509",
    "0045122928329497333784527239793935404835382490773184774826522243669415782431020326844326",
    "1429859138677960200274289140366217536044267521168181242671432860598555395417477932651737",
    "2473026828830676566676685000007270219825797786740400529876895432178047942481664223364484",
    "7360625898281880043325790340284140392733761845673476330366713560822526481417852671900969",
    "9669425232710823749815809008349127548923789667763091641324813543232363676885765455040806",
    "9916817722168843193421513083718025516580830318015547103855226532396152588205679991726989",
    "4173899051734758406916748006962606696497976568404016234903307847672518071161046831030249",
    "8255680583225037730474268335462194890455703080388050938932049372932594198289110907816834",
    "2352592695077508569999257118497827896790302796212487340164089708351253051916547360872689",
    "5594146044901762354509336900694907490835356059019952609530253729848557135032533943049481",
    "9402292206490952757362345863157838349146010931265170028900688327104752271295738766842108",
    "8288333490394916947580541578412672661169663082452295060485565178868985423148939692074200",
    "9245713124676384404328649571935143525039093840084932031962535179128832104412901401125893",
    "9062099243891011587319281702304582618412950463134332050534262469046895000577584282339802",
    "85281930206369873791679334430200976405384055835969193172916066054929703",
);

#[cfg(test)]
#[path = "../../tests/unit/animation/digits.rs"]
mod tests;
