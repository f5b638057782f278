pub use consonants::*;
pub use vowels::*;

mod vowels {
    pub const VOWELS: &str = "\
symbol,openness,location,roundedness
i,close,front,unrounded
y,close,front,rounded
ɨ,close,central,unrounded
ʉ,close,central,rounded
ɯ,close,back,unrounded
u,close,back,rounded
ɪ,near-close,front,unrounded
ʏ,near-close,front,rounded
ʊ,near-close,back,rounded
e,close-mid,front,unrounded
ø,close-mid,front,rounded
ɘ,close-mid,central,unrounded
ɵ,close-mid,central,rounded
ɤ,close-mid,back,unrounded
o,close-mid,back,rounded
e̞,mid,front,unrounded
ø̞,mid,front,rounded
ə,mid,central,unrounded
ɤ̞,mid,back,unrounded
o̞,mid,back,rounded
ɛ,open-mid,front,unrounded
œ,open-mid,front,rounded
ɜ,open-mid,central,unrounded
ɞ,open-mid,central,rounded
ʌ,open-mid,back,unrounded
ɔ,open-mid,back,rounded
æ,near-open,front,unrounded
ɐ,near-open,central,unrounded
a,open,front,unrounded
ɶ,open,front,rounded
ä,open,central,unrounded
ɑ,open,back,unrounded
ɒ,open,back,rounded";
}

mod consonants {
    pub const CONSONANTS: &str = "\
symbol,manner,place,voice
p,stop,labial,voiceless
b,stop,labial,voiced
t̼,stop,dental,voiceless
d̼,stop,dental,voiced
t,stop,alveolar-central,voiceless
d,stop,alveolar-central,voiced
ʈ,stop,retroflex,voiceless
ɖ,stop,retroflex,voiced
c,stop,palatal,voiceless
ɟ,stop,palatal,voiced
k,stop,velar,voiceless
g,stop,velar,voiced
q,stop,uvular,voiceless
ɢ,stop,uvular,voiced
ʔ,stop,glottal,voiceless
f,fricative,labial,voiceless
v,fricative,labial,voiced
θ,fricative,dental,voiceless
ð,fricative,dental,voiced
s,fricative,alveolar-central,voiceless
z,fricative,alveolar-central,voiced
ɬ,fricative,alveolar-lateral,voiceless
ɮ,fricative,alveolar-lateral,voiced
ʂ,fricative,retroflex,voiceless
ʐ,fricative,retroflex,voiced
ç,fricative,palatal,voiceless
ʝ,fricative,palatal,voiced
ʃ,fricative,post-alveolar,voiceless
ʒ,fricative,post-alveolar,voiced
x,fricative,velar,voiceless
ɣ,fricative,velar,voiced
χ,fricative,uvular,voiceless
ʁ,fricative,uvular,voiced
ħ,fricative,pharyngeal,voiceless
ʕ,fricative,pharyngeal,voiced
h,fricative,glottal,voiceless
ɦ,fricative,glottal,voiced
p͡f,affricate,labial,voiceless
b͡v,affricate,labial,voiced
t̪θ,affricate,dental,voiceless
d̪ð,affricate,dental,voiced
t͡s,affricate,alveolar-central,voiceless
d͡z,affricate,alveolar-central,voiced
t͡ɬ,affricate,alveolar-lateral,voiceless
d͡ɮ,affricate,alveolar-lateral,voiced
t̪ʂ,affricate,retroflex,voiceless
d̪ʐ,affricate,retroflex,voiced
ʧ,affricate,palatal,voiceless
ʤ,affricate,palatal,voiced
k͡x,affricate,velar,voiceless
g͡ɣ,affricate,velar,voiced
q͡χ,affricate,uvular,voiceless
ɢ͡ʁ,affricate,uvular,voiced
m̥,nasal,labial,voiceless
m,nasal,labial,voiced
n̥,nasal,alveolar-central,voiceless
n,nasal,alveolar-central,voiced
ɳ̊,nasal,retroflex,voiceless
ɳ,nasal,retroflex,voiced
ɲ̊,nasal,palatal,voiceless
ɲ,nasal,palatal,voiced
ŋ̊,nasal,velar,voiceless
ŋ,nasal,velar,voiced
ɴ,nasal,uvular,voiced
ɾ̥,liquid,alveolar-central,voiceless
ɾ,liquid,alveolar-central,voiced
l,liquid,alveolar-lateral,voiced
ɻ,liquid,retroflex,voiced
j,liquid,post-alveolar,voiced
w,liquid,velar,voiced
ʀ̥,liquid,uvular,voiceless
ʀ,liquid,uvular,voiced";
}
